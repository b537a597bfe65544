use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::core::guards::{AdminStatus, RequireAdmin};
use crate::features::teams::dtos::{
    CreateTeamMemberDto, SocialResponseDto, TeamMemberResponseDto, TeamStatsDto,
    UpdateTeamMemberDto,
};
use crate::features::teams::models::SocialPlatform;
use crate::features::teams::services::TeamService;
use crate::shared::types::{ApiResponse, DirectoryQueryParams, PaginationQuery};

/// List team members with their socials
///
/// Active members only unless an admin passes `include_inactive=true`.
#[utoipa::path(
    get,
    path = "/api/teams",
    params(DirectoryQueryParams),
    responses(
        (status = 200, description = "Team members", body = ApiResponse<Vec<TeamMemberResponseDto>>),
        (status = 401, description = "include_inactive without admin key")
    ),
    tag = "teams"
)]
pub async fn list_team_members(
    admin: AdminStatus,
    State(service): State<Arc<TeamService>>,
    Query(params): Query<DirectoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<TeamMemberResponseDto>>>> {
    if params.include_inactive {
        admin.require()?;
    }

    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// List active team members
#[utoipa::path(
    get,
    path = "/api/teams/active",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Active team members", body = ApiResponse<Vec<TeamMemberResponseDto>>)
    ),
    tag = "teams"
)]
pub async fn list_active_team_members(
    State(service): State<Arc<TeamService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<TeamMemberResponseDto>>>> {
    let params = DirectoryQueryParams {
        page: pagination.page,
        page_size: pagination.page_size,
        include_inactive: false,
    };
    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// Active team members having a link on the given platform
#[utoipa::path(
    get,
    path = "/api/teams/platform/{platform}",
    params(
        ("platform" = SocialPlatform, Path, description = "Social platform, e.g. github"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Team members on the platform", body = ApiResponse<Vec<TeamMemberResponseDto>>),
        (status = 404, description = "Unknown platform")
    ),
    tag = "teams"
)]
pub async fn list_team_members_by_platform(
    State(service): State<Arc<TeamService>>,
    AppPath(platform): AppPath<SocialPlatform>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<TeamMemberResponseDto>>>> {
    let (items, total) = service.list_by_platform(platform, &pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// Team statistics
#[utoipa::path(
    get,
    path = "/api/teams/stats",
    responses(
        (status = 200, description = "Member totals and per-platform link counts", body = ApiResponse<TeamStatsDto>)
    ),
    tag = "teams"
)]
pub async fn get_team_stats(
    State(service): State<Arc<TeamService>>,
) -> Result<Json<ApiResponse<TeamStatsDto>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Get a team member by id
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id" = i64, Path, description = "Team member id")),
    responses(
        (status = 200, description = "Team member found", body = ApiResponse<TeamMemberResponseDto>),
        (status = 404, description = "Team member not found")
    ),
    tag = "teams"
)]
pub async fn get_team_member(
    State(service): State<Arc<TeamService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<TeamMemberResponseDto>>> {
    let member = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(member), None, None)))
}

/// Social links of one team member
#[utoipa::path(
    get,
    path = "/api/teams/{id}/socials",
    params(("id" = i64, Path, description = "Team member id")),
    responses(
        (status = 200, description = "Social links", body = ApiResponse<Vec<SocialResponseDto>>),
        (status = 404, description = "Team member not found")
    ),
    tag = "socials"
)]
pub async fn list_team_member_socials(
    State(service): State<Arc<TeamService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Vec<SocialResponseDto>>>> {
    let socials = service.socials(id).await?;
    Ok(Json(ApiResponse::success(Some(socials), None, None)))
}

/// Add a team member
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamMemberDto,
    responses(
        (status = 201, description = "Team member created", body = ApiResponse<TeamMemberResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn create_team_member(
    _admin: RequireAdmin,
    State(service): State<Arc<TeamService>>,
    AppJson(dto): AppJson<CreateTeamMemberDto>,
) -> Result<(StatusCode, Json<ApiResponse<TeamMemberResponseDto>>)> {
    dto.validate()?;

    let member = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(member),
            Some("Team member created".to_string()),
            None,
        )),
    ))
}

/// Update a team member
#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    params(("id" = i64, Path, description = "Team member id")),
    request_body = UpdateTeamMemberDto,
    responses(
        (status = 200, description = "Team member updated", body = ApiResponse<TeamMemberResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team member not found")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn update_team_member(
    _admin: RequireAdmin,
    State(service): State<Arc<TeamService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateTeamMemberDto>,
) -> Result<Json<ApiResponse<TeamMemberResponseDto>>> {
    dto.validate()?;

    let member = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(member),
        Some("Team member updated".to_string()),
        None,
    )))
}

/// Remove a team member and their socials
#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id" = i64, Path, description = "Team member id")),
    responses(
        (status = 200, description = "Team member deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Team member not found")
    ),
    tag = "teams",
    security(("bearer_auth" = []))
)]
pub async fn delete_team_member(
    _admin: RequireAdmin,
    State(service): State<Arc<TeamService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Team member deleted".to_string()),
        None,
    )))
}
