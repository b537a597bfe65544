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
use crate::features::partners::dtos::{CreateSponsorDto, SponsorResponseDto, UpdateSponsorDto};
use crate::features::partners::services::SponsorService;
use crate::shared::types::{ApiResponse, DirectoryQueryParams};

/// List sponsors
///
/// `include_inactive=true` requires the admin key.
#[utoipa::path(
    get,
    path = "/api/sponsors",
    params(DirectoryQueryParams),
    responses(
        (status = 200, description = "Active sponsors by display order", body = ApiResponse<Vec<SponsorResponseDto>>),
        (status = 401, description = "include_inactive without admin key")
    ),
    tag = "sponsors"
)]
pub async fn list_sponsors(
    admin: AdminStatus,
    State(service): State<Arc<SponsorService>>,
    Query(params): Query<DirectoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<SponsorResponseDto>>>> {
    if params.include_inactive {
        admin.require()?;
    }

    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// Get a sponsor by id
#[utoipa::path(
    get,
    path = "/api/sponsors/{id}",
    params(("id" = i64, Path, description = "Sponsor id")),
    responses(
        (status = 200, description = "Sponsor found", body = ApiResponse<SponsorResponseDto>),
        (status = 404, description = "Sponsor not found")
    ),
    tag = "sponsors"
)]
pub async fn get_sponsor(
    State(service): State<Arc<SponsorService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<SponsorResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create a sponsor
#[utoipa::path(
    post,
    path = "/api/sponsors",
    request_body = CreateSponsorDto,
    responses(
        (status = 201, description = "Sponsor created", body = ApiResponse<SponsorResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "sponsors",
    security(("bearer_auth" = []))
)]
pub async fn create_sponsor(
    _admin: RequireAdmin,
    State(service): State<Arc<SponsorService>>,
    AppJson(dto): AppJson<CreateSponsorDto>,
) -> Result<(StatusCode, Json<ApiResponse<SponsorResponseDto>>)> {
    dto.validate()?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Sponsor created".to_string()),
            None,
        )),
    ))
}

/// Update a sponsor
#[utoipa::path(
    put,
    path = "/api/sponsors/{id}",
    params(("id" = i64, Path, description = "Sponsor id")),
    request_body = UpdateSponsorDto,
    responses(
        (status = 200, description = "Sponsor updated", body = ApiResponse<SponsorResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sponsor not found")
    ),
    tag = "sponsors",
    security(("bearer_auth" = []))
)]
pub async fn update_sponsor(
    _admin: RequireAdmin,
    State(service): State<Arc<SponsorService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateSponsorDto>,
) -> Result<Json<ApiResponse<SponsorResponseDto>>> {
    dto.validate()?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Sponsor updated".to_string()),
        None,
    )))
}

/// Delete a sponsor
#[utoipa::path(
    delete,
    path = "/api/sponsors/{id}",
    params(("id" = i64, Path, description = "Sponsor id")),
    responses(
        (status = 200, description = "Sponsor deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sponsor not found")
    ),
    tag = "sponsors",
    security(("bearer_auth" = []))
)]
pub async fn delete_sponsor(
    _admin: RequireAdmin,
    State(service): State<Arc<SponsorService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Sponsor deleted".to_string()),
        None,
    )))
}
