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
use crate::features::workshops::dtos::{CreateRegistrationDto, RegistrationResponseDto};
use crate::features::workshops::services::RegistrationService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Register for a workshop
///
/// Public endpoint. A confirmation email with a calendar invite is sent in
/// the background; its outcome does not affect the response.
#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationDto,
    responses(
        (status = 201, description = "Registration created", body = ApiResponse<RegistrationResponseDto>),
        (status = 400, description = "Validation error or already registered for this workshop")
    ),
    tag = "registrations"
)]
pub async fn create_registration(
    State(service): State<Arc<RegistrationService>>,
    AppJson(dto): AppJson<CreateRegistrationDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationResponseDto>>)> {
    dto.validate()?;

    let registered = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(registered.registration),
            Some("Registration successful".to_string()),
            None,
        )),
    ))
}

/// List all registrations
#[utoipa::path(
    get,
    path = "/api/registrations",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of registrations", body = ApiResponse<Vec<RegistrationResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "registrations",
    security(("bearer_auth" = []))
)]
pub async fn list_registrations(
    _admin: RequireAdmin,
    State(service): State<Arc<RegistrationService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RegistrationResponseDto>>>> {
    let (items, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// List the registrations of one workshop
#[utoipa::path(
    get,
    path = "/api/workshops/{id}/registrations",
    params(("id" = i64, Path, description = "Workshop id"), PaginationQuery),
    responses(
        (status = 200, description = "Registrations of the workshop", body = ApiResponse<Vec<RegistrationResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Workshop not found")
    ),
    tag = "registrations",
    security(("bearer_auth" = []))
)]
pub async fn list_workshop_registrations(
    _admin: RequireAdmin,
    State(service): State<Arc<RegistrationService>>,
    AppPath(id): AppPath<i64>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RegistrationResponseDto>>>> {
    let (items, total) = service.list_for_workshop(id, &pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// Get a registration by id
#[utoipa::path(
    get,
    path = "/api/registrations/{id}",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration found", body = ApiResponse<RegistrationResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations",
    security(("bearer_auth" = []))
)]
pub async fn get_registration(
    _admin: RequireAdmin,
    State(service): State<Arc<RegistrationService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<RegistrationResponseDto>>> {
    let registration = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(registration), None, None)))
}

/// Cancel a registration
#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(("id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations",
    security(("bearer_auth" = []))
)]
pub async fn delete_registration(
    _admin: RequireAdmin,
    State(service): State<Arc<RegistrationService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Registration deleted".to_string()),
        None,
    )))
}
