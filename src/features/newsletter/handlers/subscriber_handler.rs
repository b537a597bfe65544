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
use crate::features::newsletter::dtos::{CreateSubscriberDto, SubscriberResponseDto};
use crate::features::newsletter::services::SubscriberService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Subscribe to the newsletter
#[utoipa::path(
    post,
    path = "/api/subscribers",
    request_body = CreateSubscriberDto,
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse<SubscriberResponseDto>),
        (status = 400, description = "Invalid or already subscribed email")
    ),
    tag = "newsletter"
)]
pub async fn create_subscriber(
    State(service): State<Arc<SubscriberService>>,
    AppJson(dto): AppJson<CreateSubscriberDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriberResponseDto>>)> {
    dto.validate()?;

    let subscriber = service.subscribe(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(subscriber),
            Some("Subscribed to the newsletter".to_string()),
            None,
        )),
    ))
}

/// List newsletter subscribers
#[utoipa::path(
    get,
    path = "/api/subscribers",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of subscribers", body = ApiResponse<Vec<SubscriberResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "newsletter",
    security(("bearer_auth" = []))
)]
pub async fn list_subscribers(
    _admin: RequireAdmin,
    State(service): State<Arc<SubscriberService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SubscriberResponseDto>>>> {
    let (items, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::page(items, total, &pagination)))
}

/// Get a subscriber by id
#[utoipa::path(
    get,
    path = "/api/subscribers/{id}",
    params(("id" = i64, Path, description = "Subscriber id")),
    responses(
        (status = 200, description = "Subscriber found", body = ApiResponse<SubscriberResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subscriber not found")
    ),
    tag = "newsletter",
    security(("bearer_auth" = []))
)]
pub async fn get_subscriber(
    _admin: RequireAdmin,
    State(service): State<Arc<SubscriberService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<SubscriberResponseDto>>> {
    let subscriber = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(subscriber), None, None)))
}

/// Remove a subscriber
#[utoipa::path(
    delete,
    path = "/api/subscribers/{id}",
    params(("id" = i64, Path, description = "Subscriber id")),
    responses(
        (status = 200, description = "Subscriber removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Subscriber not found")
    ),
    tag = "newsletter",
    security(("bearer_auth" = []))
)]
pub async fn delete_subscriber(
    _admin: RequireAdmin,
    State(service): State<Arc<SubscriberService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Subscriber removed".to_string()),
        None,
    )))
}
