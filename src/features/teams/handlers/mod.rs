mod social_handler;
mod team_handler;

pub use social_handler::*;
pub use team_handler::*;
