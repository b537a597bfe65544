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
use crate::features::workshops::dtos::{
    AnnouncementResultDto, CreateWorkshopDto, UpdateWorkshopDto, WorkshopQueryParams,
    WorkshopResponseDto,
};
use crate::features::workshops::services::WorkshopService;
use crate::shared::types::ApiResponse;

/// List workshops
#[utoipa::path(
    get,
    path = "/api/workshops",
    params(WorkshopQueryParams),
    responses(
        (status = 200, description = "List of workshops", body = ApiResponse<Vec<WorkshopResponseDto>>),
    ),
    tag = "workshops"
)]
pub async fn list_workshops(
    State(service): State<Arc<WorkshopService>>,
    Query(params): Query<WorkshopQueryParams>,
) -> Result<Json<ApiResponse<Vec<WorkshopResponseDto>>>> {
    let (items, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::page(items, total, &params.pagination())))
}

/// Get a workshop by id
#[utoipa::path(
    get,
    path = "/api/workshops/{id}",
    params(("id" = i64, Path, description = "Workshop id")),
    responses(
        (status = 200, description = "Workshop found", body = ApiResponse<WorkshopResponseDto>),
        (status = 404, description = "Workshop not found")
    ),
    tag = "workshops"
)]
pub async fn get_workshop(
    State(service): State<Arc<WorkshopService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<WorkshopResponseDto>>> {
    let workshop = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(workshop), None, None)))
}

/// Create a workshop
#[utoipa::path(
    post,
    path = "/api/workshops",
    request_body = CreateWorkshopDto,
    responses(
        (status = 201, description = "Workshop created", body = ApiResponse<WorkshopResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workshops",
    security(("bearer_auth" = []))
)]
pub async fn create_workshop(
    _admin: RequireAdmin,
    State(service): State<Arc<WorkshopService>>,
    AppJson(dto): AppJson<CreateWorkshopDto>,
) -> Result<(StatusCode, Json<ApiResponse<WorkshopResponseDto>>)> {
    dto.validate()?;

    let workshop = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(workshop),
            Some("Workshop created".to_string()),
            None,
        )),
    ))
}

/// Update a workshop (omitted fields are left unchanged)
#[utoipa::path(
    put,
    path = "/api/workshops/{id}",
    params(("id" = i64, Path, description = "Workshop id")),
    request_body = UpdateWorkshopDto,
    responses(
        (status = 200, description = "Workshop updated", body = ApiResponse<WorkshopResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workshop not found")
    ),
    tag = "workshops",
    security(("bearer_auth" = []))
)]
pub async fn update_workshop(
    _admin: RequireAdmin,
    State(service): State<Arc<WorkshopService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateWorkshopDto>,
) -> Result<Json<ApiResponse<WorkshopResponseDto>>> {
    dto.validate()?;

    let workshop = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(workshop),
        Some("Workshop updated".to_string()),
        None,
    )))
}

/// Delete a workshop and its registrations
#[utoipa::path(
    delete,
    path = "/api/workshops/{id}",
    params(("id" = i64, Path, description = "Workshop id")),
    responses(
        (status = 200, description = "Workshop deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workshop not found")
    ),
    tag = "workshops",
    security(("bearer_auth" = []))
)]
pub async fn delete_workshop(
    _admin: RequireAdmin,
    State(service): State<Arc<WorkshopService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Workshop deleted".to_string()),
        None,
    )))
}

/// Announce a workshop to people who attended other workshops
#[utoipa::path(
    post,
    path = "/api/workshops/{id}/announce",
    params(("id" = i64, Path, description = "Workshop id")),
    responses(
        (status = 200, description = "Announcement sent", body = ApiResponse<AnnouncementResultDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workshop not found")
    ),
    tag = "workshops",
    security(("bearer_auth" = []))
)]
pub async fn announce_workshop(
    _admin: RequireAdmin,
    State(service): State<Arc<WorkshopService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<AnnouncementResultDto>>> {
    let result = service.announce(id).await?;
    let message = format!("Announcement sent to {} of {} recipients", result.sent, result.recipients);
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
