mod contributor_service;
mod lookup_service;
mod partner_service;
mod sponsor_service;
mod supporter_service;

pub use contributor_service::ContributorService;
pub use lookup_service::LookupService;
pub use partner_service::PartnerService;
pub use sponsor_service::SponsorService;
pub use supporter_service::SupporterService;
