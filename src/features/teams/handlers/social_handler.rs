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
use crate::features::teams::dtos::{CreateSocialDto, SocialResponseDto, UpdateSocialDto};
use crate::features::teams::services::SocialService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// List all social links
#[utoipa::path(
    get,
    path = "/api/socials",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Social links", body = ApiResponse<Vec<SocialResponseDto>>)
    ),
    tag = "socials"
)]
pub async fn list_socials(
    State(service): State<Arc<SocialService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SocialResponseDto>>>> {
    let (items, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

#[utoipa::path(
    get,
    path = "/api/socials/{id}",
    params(("id" = i64, Path, description = "Social id")),
    responses(
        (status = 200, description = "Social link found", body = ApiResponse<SocialResponseDto>),
        (status = 404, description = "Social link not found")
    ),
    tag = "socials"
)]
pub async fn get_social(
    State(service): State<Arc<SocialService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<SocialResponseDto>>> {
    let social = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(social), None, None)))
}

/// Add a social link to an active team member
#[utoipa::path(
    post,
    path = "/api/socials",
    request_body = CreateSocialDto,
    responses(
        (status = 201, description = "Social link created", body = ApiResponse<SocialResponseDto>),
        (status = 400, description = "Validation error, inactive member, duplicate platform or second primary link"),
        (status = 401, description = "Unauthorized"),
    ),
    tag = "socials",
    security(("bearer_auth" = []))
)]
pub async fn create_social(
    _admin: RequireAdmin,
    State(service): State<Arc<SocialService>>,
    AppJson(dto): AppJson<CreateSocialDto>,
) -> Result<(StatusCode, Json<ApiResponse<SocialResponseDto>>)> {
    dto.validate()?;

    let social = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(social),
            Some("Social link created".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/socials/{id}",
    params(("id" = i64, Path, description = "Social id")),
    request_body = UpdateSocialDto,
    responses(
        (status = 200, description = "Social link updated", body = ApiResponse<SocialResponseDto>),
        (status = 400, description = "Validation error, duplicate platform or second primary link"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Social link not found"),
    ),
    tag = "socials",
    security(("bearer_auth" = []))
)]
pub async fn update_social(
    _admin: RequireAdmin,
    State(service): State<Arc<SocialService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdateSocialDto>,
) -> Result<Json<ApiResponse<SocialResponseDto>>> {
    dto.validate()?;

    let social = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(social),
        Some("Social link updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/socials/{id}",
    params(("id" = i64, Path, description = "Social id")),
    responses(
        (status = 200, description = "Social link deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Social link not found")
    ),
    tag = "socials",
    security(("bearer_auth" = []))
)]
pub async fn delete_social(
    _admin: RequireAdmin,
    State(service): State<Arc<SocialService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Social link deleted".to_string()),
        None,
    )))
}
