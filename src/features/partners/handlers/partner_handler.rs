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
use crate::features::partners::dtos::{CreatePartnerDto, PartnerResponseDto, UpdatePartnerDto};
use crate::features::partners::services::PartnerService;
use crate::shared::types::{ApiResponse, DirectoryQueryParams};

/// List strategic partners
///
/// `include_inactive=true` requires the admin key.
#[utoipa::path(
    get,
    path = "/api/partners",
    params(DirectoryQueryParams),
    responses(
        (status = 200, description = "Active partners by display order", body = ApiResponse<Vec<PartnerResponseDto>>),
        (status = 401, description = "include_inactive without admin key")
    ),
    tag = "partners"
)]
pub async fn list_partners(
    admin: AdminStatus,
    State(service): State<Arc<PartnerService>>,
    Query(params): Query<DirectoryQueryParams>,
) -> Result<Json<ApiResponse<Vec<PartnerResponseDto>>>> {
    if params.include_inactive {
        admin.require()?;
    }

    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// Get a partner by id
#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    responses(
        (status = 200, description = "Partner found", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn get_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<PartnerResponseDto>>> {
    let item = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Create a partner
#[utoipa::path(
    post,
    path = "/api/partners",
    request_body = CreatePartnerDto,
    responses(
        (status = 201, description = "Partner created", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "partners",
    security(("bearer_auth" = []))
)]
pub async fn create_partner(
    _admin: RequireAdmin,
    State(service): State<Arc<PartnerService>>,
    AppJson(dto): AppJson<CreatePartnerDto>,
) -> Result<(StatusCode, Json<ApiResponse<PartnerResponseDto>>)> {
    dto.validate()?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Partner created".to_string()),
            None,
        )),
    ))
}

/// Update a partner
#[utoipa::path(
    put,
    path = "/api/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    request_body = UpdatePartnerDto,
    responses(
        (status = 200, description = "Partner updated", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners",
    security(("bearer_auth" = []))
)]
pub async fn update_partner(
    _admin: RequireAdmin,
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePartnerDto>,
) -> Result<Json<ApiResponse<PartnerResponseDto>>> {
    dto.validate()?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Partner updated".to_string()),
        None,
    )))
}

/// Delete a partner
#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    params(("id" = i64, Path, description = "Partner id")),
    responses(
        (status = 200, description = "Partner deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners",
    security(("bearer_auth" = []))
)]
pub async fn delete_partner(
    _admin: RequireAdmin,
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Partner deleted".to_string()),
        None,
    )))
}
