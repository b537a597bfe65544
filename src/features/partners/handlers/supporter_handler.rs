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
    CreateSupporterDto, SupporterResponseDto, UpdateSupporterDto,
};
use crate::features::partners::services::SupporterService;
use crate::shared::types::{ApiResponse, DirectoryQueryParams};

/// List supporters
///
/// `include_inactive=true` requires the admin key.
#[utoipa::path(
    get,
    path = "/api/supporters",
    params(DirectoryQueryParams),
    responses(
        (status = 200, description = "Active supporters, most recent first", body = ApiResponse<Vec<SupporterResponseDto>>),
        (status = 401, description = "include_inactive without admin key")
    ),
    tag = "supporters"
)]
pub async fn list_supporters(
    admin: AdminStatus,
    State(service): State<Arc<SupporterService>>,
    Query(params): Query<DirectoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<SupporterResponseDto>>>> {
    if params.include_inactive {
        admin.require()?;
    }

    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// Get a supporter by id
#[utoipa::path(
    get,
    path = "/api/supporters/{id}",
    params(("id" = i64, Path, description = "Supporter id")),
    responses(
        (status = 200, description = "Supporter found", body = ApiResponse<SupporterResponseDto>),
        (status = 404, description = "Supporter not found")
    ),
    tag = "supporters"
)]
pub async fn get_supporter(
    State(service): State<Arc<SupporterService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<SupporterResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create a supporter
#[utoipa::path(
    post,
    path = "/api/supporters",
    request_body = CreateSupporterDto,
    responses(
        (status = 201, description = "Supporter created", body = ApiResponse<SupporterResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "supporters",
    security(("bearer_auth" = []))
)]
pub async fn create_supporter(
    _admin: RequireAdmin,
    State(service): State<Arc<SupporterService>>,
    AppJson(dto): AppJson<CreateSupporterDto>,
) -> Result<(StatusCode, Json<ApiResponse<SupporterResponseDto>>)> {
    dto.validate()?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Supporter created".to_string()),
            None,
        )),
    ))
}

/// Update a supporter
#[utoipa::path(
    put,
    path = "/api/supporters/{id}",
    params(("id" = i64, Path, description = "Supporter id")),
    request_body = UpdateSupporterDto,
    responses(
        (status = 200, description = "Supporter updated", body = ApiResponse<SupporterResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Supporter not found")
    ),
    tag = "supporters",
    security(("bearer_auth" = []))
)]
pub async fn update_supporter(
    _admin: RequireAdmin,
    State(service): State<Arc<SupporterService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateSupporterDto>,
) -> Result<Json<ApiResponse<SupporterResponseDto>>> {
    dto.validate()?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Supporter updated".to_string()),
        None,
    )))
}

/// Delete a supporter
#[utoipa::path(
    delete,
    path = "/api/supporters/{id}",
    params(("id" = i64, Path, description = "Supporter id")),
    responses(
        (status = 200, description = "Supporter deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Supporter not found")
    ),
    tag = "supporters",
    security(("bearer_auth" = []))
)]
pub async fn delete_supporter(
    _admin: RequireAdmin,
    State(service): State<Arc<SupporterService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Supporter deleted".to_string()),
        None,
    )))
}
