pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;

pub use services::{PgRegistrationRepository, RegistrationService, WorkshopService};
