mod registration_handler;
mod workshop_handler;

pub use registration_handler::*;
pub use workshop_handler::*;
