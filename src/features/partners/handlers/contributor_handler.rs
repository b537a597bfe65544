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
use crate::features::partners::dtos::{
    ContributorResponseDto, CreateContributorDto, UpdateContributorDto,
};
use crate::features::partners::services::ContributorService;
use crate::shared::types::{ApiResponse, DirectoryQueryParams};

/// List contributors
///
/// `include_inactive=true` requires the admin key.
#[utoipa::path(
    get,
    path = "/api/contributors",
    params(DirectoryQueryParams),
    responses(
        (status = 200, description = "Active volunteers and mentors by display order", body = ApiResponse<Vec<ContributorResponseDto>>),
        (status = 401, description = "include_inactive without admin key")
    ),
    tag = "contributors"
)]
pub async fn list_contributors(
    admin: AdminStatus,
    State(service): State<Arc<ContributorService>>,
    Query(params): Query<DirectoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<ContributorResponseDto>>>> {
    if params.include_inactive {
        admin.require()?;
    }

    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// Get a contributor by id
#[utoipa::path(
    get,
    path = "/api/contributors/{id}",
    params(("id" = i64, Path, description = "Contributor id")),
    responses(
        (status = 200, description = "Contributor found", body = ApiResponse<ContributorResponseDto>),
        (status = 404, description = "Contributor not found")
    ),
    tag = "contributors"
)]
pub async fn get_contributor(
    State(service): State<Arc<ContributorService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<ContributorResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create a contributor
#[utoipa::path(
    post,
    path = "/api/contributors",
    request_body = CreateContributorDto,
    responses(
        (status = 201, description = "Contributor created", body = ApiResponse<ContributorResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "contributors",
    security(("bearer_auth" = []))
)]
pub async fn create_contributor(
    _admin: RequireAdmin,
    State(service): State<Arc<ContributorService>>,
    AppJson(dto): AppJson<CreateContributorDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContributorResponseDto>>)> {
    dto.validate()?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Contributor created".to_string()),
            None,
        )),
    ))
}

/// Update a contributor
#[utoipa::path(
    put,
    path = "/api/contributors/{id}",
    params(("id" = i64, Path, description = "Contributor id")),
    request_body = UpdateContributorDto,
    responses(
        (status = 200, description = "Contributor updated", body = ApiResponse<ContributorResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contributor not found")
    ),
    tag = "contributors",
    security(("bearer_auth" = []))
)]
pub async fn update_contributor(
    _admin: RequireAdmin,
    State(service): State<Arc<ContributorService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateContributorDto>,
) -> Result<Json<ApiResponse<ContributorResponseDto>>> {
    dto.validate()?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Contributor updated".to_string()),
        None,
    )))
}

/// Delete a contributor
#[utoipa::path(
    delete,
    path = "/api/contributors/{id}",
    params(("id" = i64, Path, description = "Contributor id")),
    responses(
        (status = 200, description = "Contributor deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contributor not found")
    ),
    tag = "contributors",
    security(("bearer_auth" = []))
)]
pub async fn delete_contributor(
    _admin: RequireAdmin,
    State(service): State<Arc<ContributorService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Contributor deleted".to_string()),
        None,
    )))
}
