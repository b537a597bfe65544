mod contributor_handler;
mod lookup_handler;
mod partner_handler;
mod sponsor_handler;
mod supporter_handler;

pub use contributor_handler::*;
pub use lookup_handler::*;
pub use partner_handler::*;
pub use sponsor_handler::*;
pub use supporter_handler::*;
