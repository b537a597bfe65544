use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::newsletter::{dtos as newsletter_dtos, handlers as newsletter_handlers};
use crate::features::partners::{
    dtos as partners_dtos, handlers as partners_handlers, models as partners_models,
};
use crate::features::teams::{dtos as teams_dtos, handlers as teams_handlers, models as teams_models};
use crate::features::workshops::{
    dtos as workshops_dtos, handlers as workshops_handlers, models as workshops_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Workshops
        workshops_handlers::list_workshops,
        workshops_handlers::get_workshop,
        workshops_handlers::create_workshop,
        workshops_handlers::update_workshop,
        workshops_handlers::delete_workshop,
        workshops_handlers::announce_workshop,
        // Registrations
        workshops_handlers::create_registration,
        workshops_handlers::list_registrations,
        workshops_handlers::list_workshop_registrations,
        workshops_handlers::get_registration,
        workshops_handlers::delete_registration,
        // Newsletter
        newsletter_handlers::create_subscriber,
        newsletter_handlers::list_subscribers,
        newsletter_handlers::get_subscriber,
        newsletter_handlers::delete_subscriber,
        // Lookups
        partners_handlers::list_lookups,
        partners_handlers::get_lookup,
        partners_handlers::create_lookup,
        partners_handlers::update_lookup,
        partners_handlers::delete_lookup,
        // Partners
        partners_handlers::list_partners,
        partners_handlers::get_partner,
        partners_handlers::create_partner,
        partners_handlers::update_partner,
        partners_handlers::delete_partner,
        // Contributors
        partners_handlers::list_contributors,
        partners_handlers::get_contributor,
        partners_handlers::create_contributor,
        partners_handlers::update_contributor,
        partners_handlers::delete_contributor,
        // Sponsors
        partners_handlers::list_sponsors,
        partners_handlers::get_sponsor,
        partners_handlers::create_sponsor,
        partners_handlers::update_sponsor,
        partners_handlers::delete_sponsor,
        // Supporters
        partners_handlers::list_supporters,
        partners_handlers::get_supporter,
        partners_handlers::create_supporter,
        partners_handlers::update_supporter,
        partners_handlers::delete_supporter,
        // Teams
        teams_handlers::list_team_members,
        teams_handlers::list_active_team_members,
        teams_handlers::list_team_members_by_platform,
        teams_handlers::get_team_stats,
        teams_handlers::get_team_member,
        teams_handlers::create_team_member,
        teams_handlers::update_team_member,
        teams_handlers::delete_team_member,
        // Socials
        teams_handlers::list_team_member_socials,
        teams_handlers::list_socials,
        teams_handlers::get_social,
        teams_handlers::create_social,
        teams_handlers::update_social,
        teams_handlers::delete_social,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Workshops
            workshops_models::ExperienceLevel,
            workshops_dtos::CreateWorkshopDto,
            workshops_dtos::UpdateWorkshopDto,
            workshops_dtos::WorkshopResponseDto,
            workshops_dtos::AnnouncementResultDto,
            workshops_dtos::CreateRegistrationDto,
            workshops_dtos::RegistrationResponseDto,
            ApiResponse<workshops_dtos::WorkshopResponseDto>,
            ApiResponse<Vec<workshops_dtos::WorkshopResponseDto>>,
            ApiResponse<workshops_dtos::AnnouncementResultDto>,
            ApiResponse<workshops_dtos::RegistrationResponseDto>,
            ApiResponse<Vec<workshops_dtos::RegistrationResponseDto>>,
            // Newsletter
            newsletter_dtos::CreateSubscriberDto,
            newsletter_dtos::SubscriberResponseDto,
            ApiResponse<newsletter_dtos::SubscriberResponseDto>,
            ApiResponse<Vec<newsletter_dtos::SubscriberResponseDto>>,
            // Partner family
            partners_models::LookupKind,
            partners_dtos::CreateLookupDto,
            partners_dtos::UpdateLookupDto,
            partners_dtos::LookupResponseDto,
            partners_dtos::CreatePartnerDto,
            partners_dtos::UpdatePartnerDto,
            partners_dtos::PartnerResponseDto,
            partners_dtos::CreateContributorDto,
            partners_dtos::UpdateContributorDto,
            partners_dtos::ContributorResponseDto,
            partners_dtos::CreateSponsorDto,
            partners_dtos::UpdateSponsorDto,
            partners_dtos::SponsorResponseDto,
            partners_dtos::CreateSupporterDto,
            partners_dtos::UpdateSupporterDto,
            partners_dtos::SupporterResponseDto,
            ApiResponse<partners_dtos::LookupResponseDto>,
            ApiResponse<Vec<partners_dtos::LookupResponseDto>>,
            ApiResponse<partners_dtos::PartnerResponseDto>,
            ApiResponse<Vec<partners_dtos::PartnerResponseDto>>,
            ApiResponse<partners_dtos::ContributorResponseDto>,
            ApiResponse<Vec<partners_dtos::ContributorResponseDto>>,
            ApiResponse<partners_dtos::SponsorResponseDto>,
            ApiResponse<Vec<partners_dtos::SponsorResponseDto>>,
            ApiResponse<partners_dtos::SupporterResponseDto>,
            ApiResponse<Vec<partners_dtos::SupporterResponseDto>>,
            // Teams
            teams_models::SocialPlatform,
            teams_dtos::CreateTeamMemberDto,
            teams_dtos::UpdateTeamMemberDto,
            teams_dtos::TeamMemberResponseDto,
            teams_dtos::TeamStatsDto,
            teams_dtos::CreateSocialDto,
            teams_dtos::UpdateSocialDto,
            teams_dtos::SocialResponseDto,
            ApiResponse<teams_dtos::TeamMemberResponseDto>,
            ApiResponse<Vec<teams_dtos::TeamMemberResponseDto>>,
            ApiResponse<teams_dtos::TeamStatsDto>,
            ApiResponse<teams_dtos::SocialResponseDto>,
            ApiResponse<Vec<teams_dtos::SocialResponseDto>>,
        )
    ),
    tags(
        (name = "workshops", description = "Workshops (public reads, admin writes)"),
        (name = "registrations", description = "Workshop registrations"),
        (name = "newsletter", description = "Newsletter subscribers"),
        (name = "lookups", description = "Partner tiers, partner types, contributor roles and sponsor levels"),
        (name = "partners", description = "Strategic partners"),
        (name = "contributors", description = "Volunteers and mentors"),
        (name = "sponsors", description = "Financial sponsors"),
        (name = "supporters", description = "Recent supporters"),
        (name = "teams", description = "Team members"),
        (name = "socials", description = "Social links of team members"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Campus Core API",
        version = "0.1.0",
        description = "API documentation for the community site backend",
    )
)]
pub struct ApiDoc;

/// Adds the admin key bearer scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("ADMIN_API_KEY"))
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
