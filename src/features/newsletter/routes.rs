use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::newsletter::handlers;
use crate::features::newsletter::services::SubscriberService;

/// Create routes for newsletter subscribers
///
/// Subscribing is public; the subscriber list is admin only.
pub fn routes(service: Arc<SubscriberService>) -> Router {
    Router::new()
        .route(
            "/api/subscribers",
            get(handlers::list_subscribers).post(handlers::create_subscriber),
        )
        .route(
            "/api/subscribers/{id}",
            get(handlers::get_subscriber).delete(handlers::delete_subscriber),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guards::AdminAccess;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum::Extension;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let app = routes(Arc::new(SubscriberService::new(lazy_pool()))).layer(Extension(
            Arc::new(AdminAccess::new(Some("s3cret".to_string()))),
        ));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_subscriber_list_requires_admin_key() {
        let server = server();

        server
            .get("/api/subscribers")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .delete("/api/subscribers/1")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_before_database() {
        let server = server();

        let response = server
            .post("/api/subscribers")
            .json(&json!({ "email": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["field_errors"]["email"][0],
            "Email field cannot be empty."
        );

        let response = server
            .post("/api/subscribers")
            .json(&json!({ "email": "not-an-email" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_overlong_name_is_rejected() {
        let server = server();

        let response = server
            .post("/api/subscribers")
            .json(&json!({ "email": "a@b.io", "name": "x".repeat(101) }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["field_errors"]["name"][0],
            "Name must not exceed 100 characters"
        );
    }
}
