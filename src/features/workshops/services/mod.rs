mod registration_repository;
mod registration_service;
mod workshop_service;

pub use registration_repository::{
    PgRegistrationRepository, RegistrationRepository, DUPLICATE_REGISTRATION_MESSAGE,
};
pub use registration_service::{Registered, RegistrationService};
pub use workshop_service::WorkshopService;
