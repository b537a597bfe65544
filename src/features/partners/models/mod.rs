mod contributor;
mod lookup;
mod partner;
mod sponsor;
mod supporter;

pub use contributor::ContributorRow;
pub use lookup::{LookupEntry, LookupKind};
pub use partner::PartnerRow;
pub use sponsor::SponsorRow;
pub use supporter::Supporter;
