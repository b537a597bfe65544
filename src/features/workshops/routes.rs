use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::workshops::handlers;
use crate::features::workshops::services::{RegistrationService, WorkshopService};

/// Create routes for workshops
///
/// Reads are public; writes and announcements require the admin key.
pub fn routes(service: Arc<WorkshopService>) -> Router {
    Router::new()
        .route(
            "/api/workshops",
            get(handlers::list_workshops).post(handlers::create_workshop),
        )
        .route(
            "/api/workshops/{id}",
            get(handlers::get_workshop)
                .put(handlers::update_workshop)
                .delete(handlers::delete_workshop),
        )
        .route(
            "/api/workshops/{id}/announce",
            post(handlers::announce_workshop),
        )
        .with_state(service)
}

/// Create routes for registrations
///
/// Registering is public; reading and cancelling require the admin key.
pub fn registration_routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route(
            "/api/registrations",
            get(handlers::list_registrations).post(handlers::create_registration),
        )
        .route(
            "/api/registrations/{id}",
            get(handlers::get_registration).delete(handlers::delete_registration),
        )
        .route(
            "/api/workshops/{id}/registrations",
            get(handlers::list_workshop_registrations),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guards::AdminAccess;
    use crate::features::notifications::NotificationService;
    use crate::shared::media::MediaUrls;
    use crate::shared::templates::TemplateRenderer;
    use crate::shared::test_helpers::{
        lazy_pool, workshop_fixture, InMemoryRegistrationRepository, RecordingMailer,
    };
    use axum::http::StatusCode;
    use axum::Extension;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn registration_server(admin_key: Option<&str>) -> (TestServer, Arc<RecordingMailer>) {
        let mailer = Arc::new(RecordingMailer::new());
        let repository = Arc::new(InMemoryRegistrationRepository::with_workshops(vec![
            workshop_fixture(1, "Intro to Django"),
        ]));
        let notifier = Arc::new(NotificationService::new(
            mailer.clone(),
            Arc::new(TemplateRenderer::empty()),
            "Django Campus",
        ));
        let app = registration_routes(Arc::new(RegistrationService::new(repository, notifier)))
            .layer(Extension(Arc::new(AdminAccess::new(
                admin_key.map(str::to_string),
            ))));

        (TestServer::new(app).unwrap(), mailer)
    }

    #[tokio::test]
    async fn test_register_returns_created() {
        let (server, _) = registration_server(None);

        let response = server
            .post("/api/registrations")
            .json(&json!({
                "workshop": 1,
                "user_name": "  jane doe ",
                "user_email": "  User@Example.COM ",
                "django_experience": "Intermediate"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user_name"], "Jane Doe");
        assert_eq!(body["data"]["user_email"], "user@example.com");
        assert_eq!(body["data"]["will_attend_physical"], true);
        assert_eq!(body["data"]["django_experience"], "Intermediate");
        assert_eq!(body["data"]["workshop_name"], "Intro to Django");
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_bad_request() {
        let (server, _) = registration_server(None);
        let payload = json!({
            "workshop": 1,
            "user_name": "Jane Doe",
            "user_email": "jane@example.com"
        });

        server
            .post("/api/registrations")
            .json(&payload)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/api/registrations").json(&payload).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "You are already registered for this workshop.");
        assert_eq!(body["errors"][0], "You are already registered for this workshop.");
    }

    #[tokio::test]
    async fn test_invalid_registration_reports_field_errors() {
        let (server, mailer) = registration_server(None);

        let response = server
            .post("/api/registrations")
            .json(&json!({
                "workshop": 1,
                "user_name": "   ",
                "user_email": "jane@example.com",
                "phone_number": "call me"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["field_errors"]["user_name"][0],
            "Name field cannot be empty."
        );
        assert_eq!(
            body["field_errors"]["phone_number"][0],
            "Enter a valid phone number."
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _) = registration_server(None);

        let response = server
            .post("/api/registrations")
            .json(&json!({ "workshop": "one" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_key_guards_registration_reads() {
        let (server, _) = registration_server(Some("s3cret"));

        server
            .get("/api/registrations")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/registrations")
            .authorization_bearer("s3cret")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 0);
        assert_eq!(body["meta"]["page_size"], 20);
    }

    #[tokio::test]
    async fn test_unknown_registration_is_not_found() {
        let (server, _) = registration_server(None);

        server
            .get("/api/registrations/404")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/registrations/abc")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_workshop_writes_require_admin_key() {
        let notifications = Arc::new(NotificationService::new(
            Arc::new(RecordingMailer::new()),
            Arc::new(TemplateRenderer::empty()),
            "Django Campus",
        ));
        let service = Arc::new(WorkshopService::new(
            lazy_pool(),
            MediaUrls::new("http://media.test"),
            notifications,
        ));
        let app = routes(service).layer(Extension(Arc::new(AdminAccess::new(Some(
            "s3cret".to_string(),
        )))));
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/workshops")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .delete("/api/workshops/1")
            .authorization_bearer("wrong")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        // Blank fields are rejected before the database is touched
        let response = server
            .post("/api/workshops")
            .authorization_bearer("s3cret")
            .json(&json!({
                "workshop_name": "  ",
                "workshop_date": "2025-03-15",
                "workshop_location": ""
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["field_errors"]["workshop_name"][0],
            "Workshop name cannot be empty."
        );
    }
}
