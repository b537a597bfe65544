//! Authorization guard for management routes.
//!
//! Public visitors can browse workshops, partners and the team, register and
//! subscribe. Everything else (creating content, reading registrations or
//! subscriber lists) requires the shared admin key sent as
//! `Authorization: Bearer <ADMIN_API_KEY>`.
//!
//! The configured key travels in request extensions (see `main.rs`). When no
//! key is configured the guard lets every request through. A router without
//! the extension rejects every admin request.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::core::error::AppError;

/// Admin key configuration made available to handlers through extensions
#[derive(Debug, Clone, Default)]
pub struct AdminAccess {
    api_key: Option<String>,
}

impl AdminAccess {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check an `Authorization` header value against the configured key
    pub fn authorize(&self, authorization: Option<&str>) -> Result<(), AppError> {
        let Some(expected) = self.api_key.as_deref() else {
            return Ok(());
        };

        let header = authorization
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format".to_string())
        })?;

        if token != expected {
            return Err(AppError::Unauthorized("Invalid admin key".to_string()));
        }

        Ok(())
    }
}

/// Guard for management endpoints.
///
/// # Example
/// ```ignore
/// pub async fn handler(_admin: RequireAdmin, ...) { ... }
/// ```
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let Some(access) = parts.extensions.get::<Arc<AdminAccess>>() else {
            tracing::warn!("Admin access extension missing, rejecting {}", parts.uri.path());
            return Err(AppError::Unauthorized(
                "Admin access is not configured".to_string(),
            ));
        };
        access.authorize(authorization)?;

        Ok(RequireAdmin)
    }
}

/// Admin check for public endpoints with admin-only options.
///
/// Never rejects by itself; call [`AdminStatus::require`] when the request
/// asks for something only admins may see.
pub struct AdminStatus(Result<(), AppError>);

impl AdminStatus {
    pub fn require(self) -> Result<RequireAdmin, AppError> {
        self.0.map(|_| RequireAdmin)
    }
}

impl<S> FromRequestParts<S> for AdminStatus
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let outcome = RequireAdmin::from_request_parts(parts, state)
            .await
            .map(|_| ());
        Ok(AdminStatus(outcome))
    }
}
