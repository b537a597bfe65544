//! Workshop email notifications and calendar invites

pub mod calendar;
pub mod services;

pub use services::{NotificationService, RegistrationNotifier};
