use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::core::guards::RequireAdmin;
use crate::features::partners::dtos::{CreateLookupDto, LookupResponseDto, UpdateLookupDto};
use crate::features::partners::models::LookupKind;
use crate::features::partners::services::LookupService;
use crate::shared::types::{ApiResponse, PaginationQuery};

// One handler set serves all four lookup tables; the router binds each
// collection path to its own `LookupService`.

/// List lookup rows (tiers, types, roles or levels)
#[utoipa::path(
    get,
    path = "/api/{lookup}",
    params(
        ("lookup" = LookupKind, Path, description = "partner-tiers, partner-types, contributor-roles or sponsor-levels"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Lookup rows by display order", body = ApiResponse<Vec<LookupResponseDto>>)
    ),
    tag = "lookups"
)]
pub async fn list_lookups(
    State(service): State<Arc<LookupService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LookupResponseDto>>>> {
    let (items, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// Get a lookup row
#[utoipa::path(
    get,
    path = "/api/{lookup}/{id}",
    params(
        ("lookup" = LookupKind, Path, description = "Lookup table"),
        ("id" = i64, Path, description = "Row id")
    ),
    responses(
        (status = 200, description = "Lookup row found", body = ApiResponse<LookupResponseDto>),
        (status = 404, description = "Not found")
    ),
    tag = "lookups"
)]
pub async fn get_lookup(
    State(service): State<Arc<LookupService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<LookupResponseDto>>> {
    let entry = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(entry), None, None)))
}

/// Create a lookup row
#[utoipa::path(
    post,
    path = "/api/{lookup}",
    params(("lookup" = LookupKind, Path, description = "Lookup table")),
    request_body = CreateLookupDto,
    responses(
        (status = 201, description = "Lookup row created", body = ApiResponse<LookupResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "lookups",
    security(("bearer_auth" = []))
)]
pub async fn create_lookup(
    _admin: RequireAdmin,
    State(service): State<Arc<LookupService>>,
    AppJson(dto): AppJson<CreateLookupDto>,
) -> Result<(StatusCode, Json<ApiResponse<LookupResponseDto>>)> {
    dto.validate()?;

    let entry = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(entry),
            Some(format!("{} created", service.kind().label())),
            None,
        )),
    ))
}

/// Update a lookup row
#[utoipa::path(
    put,
    path = "/api/{lookup}/{id}",
    params(
        ("lookup" = LookupKind, Path, description = "Lookup table"),
        ("id" = i64, Path, description = "Row id")
    ),
    request_body = UpdateLookupDto,
    responses(
        (status = 200, description = "Lookup row updated", body = ApiResponse<LookupResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "lookups",
    security(("bearer_auth" = []))
)]
pub async fn update_lookup(
    _admin: RequireAdmin,
    State(service): State<Arc<LookupService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateLookupDto>,
) -> Result<Json<ApiResponse<LookupResponseDto>>> {
    dto.validate()?;

    let entry = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(entry),
        Some(format!("{} updated", service.kind().label())),
        None,
    )))
}

/// Delete a lookup row. References to it are cleared.
#[utoipa::path(
    delete,
    path = "/api/{lookup}/{id}",
    params(
        ("lookup" = LookupKind, Path, description = "Lookup table"),
        ("id" = i64, Path, description = "Row id")
    ),
    responses(
        (status = 200, description = "Lookup row deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    tag = "lookups",
    security(("bearer_auth" = []))
)]
pub async fn delete_lookup(
    _admin: RequireAdmin,
    State(service): State<Arc<LookupService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("{} deleted", service.kind().label())),
        None,
    )))
}
