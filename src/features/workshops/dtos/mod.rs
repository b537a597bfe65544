mod registration_dto;
mod workshop_dto;

pub use registration_dto::{CreateRegistrationDto, RegistrationResponseDto};
pub use workshop_dto::{
    AnnouncementResultDto, CreateWorkshopDto, UpdateWorkshopDto, WorkshopQueryParams,
    WorkshopResponseDto,
};
