pub mod newsletter;
pub mod notifications;
pub mod partners;
pub mod teams;
pub mod workshops;
