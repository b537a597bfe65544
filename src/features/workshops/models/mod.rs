mod registration;
mod workshop;

pub use registration::{ExperienceLevel, NewRegistration, RegistrationDetail, WorkshopRegistration};
pub use workshop::{Attendee, Workshop, WorkshopWithCount};
