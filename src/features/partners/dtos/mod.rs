mod contributor_dto;
mod lookup_dto;
mod partner_dto;
mod sponsor_dto;
mod supporter_dto;

pub use contributor_dto::{ContributorResponseDto, CreateContributorDto, UpdateContributorDto};
pub use lookup_dto::{CreateLookupDto, LookupResponseDto, UpdateLookupDto};
pub use partner_dto::{CreatePartnerDto, PartnerResponseDto, UpdatePartnerDto};
pub use sponsor_dto::{CreateSponsorDto, SponsorResponseDto, UpdateSponsorDto};
pub use supporter_dto::{CreateSupporterDto, SupporterResponseDto, UpdateSupporterDto};
