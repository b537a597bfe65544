use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::teams::handlers;
use crate::features::teams::services::{SocialService, TeamService};

/// Create routes for team members
///
/// Reads are public; writes require the admin key.
pub fn routes(service: Arc<TeamService>) -> Router {
    Router::new()
        .route(
            "/api/teams",
            get(handlers::list_team_members).post(handlers::create_team_member),
        )
        .route("/api/teams/active", get(handlers::list_active_team_members))
        .route("/api/teams/stats", get(handlers::get_team_stats))
        .route(
            "/api/teams/platform/{platform}",
            get(handlers::list_team_members_by_platform),
        )
        .route(
            "/api/teams/{id}",
            get(handlers::get_team_member)
                .put(handlers::update_team_member)
                .delete(handlers::delete_team_member),
        )
        .route(
            "/api/teams/{id}/socials",
            get(handlers::list_team_member_socials),
        )
        .with_state(service)
}

/// Create routes for social links
pub fn social_routes(service: Arc<SocialService>) -> Router {
    Router::new()
        .route(
            "/api/socials",
            get(handlers::list_socials).post(handlers::create_social),
        )
        .route(
            "/api/socials/{id}",
            get(handlers::get_social)
                .put(handlers::update_social)
                .delete(handlers::delete_social),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guards::AdminAccess;
    use crate::features::teams::services::PgSocialRepository;
    use crate::shared::media::MediaUrls;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum::Extension;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let teams = Arc::new(TeamService::new(
            lazy_pool(),
            MediaUrls::new("http://media.test"),
        ));
        let socials = Arc::new(SocialService::new(Arc::new(PgSocialRepository::new(
            lazy_pool(),
        ))));
        let app = routes(teams)
            .merge(social_routes(socials))
            .layer(Extension(Arc::new(AdminAccess::new(Some(
                "s3cret".to_string(),
            )))));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_team_writes_require_admin_key() {
        let server = server();

        server
            .post("/api/teams")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .put("/api/socials/1")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/api/teams")
            .add_query_param("include_inactive", true)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_platform_is_not_found() {
        let server = server();

        server
            .get("/api/teams/platform/myspace")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_team_fields_are_rejected() {
        let server = server();

        let response = server
            .post("/api/teams")
            .authorization_bearer("s3cret")
            .json(&json!({ "full_name": " ", "position": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(
            body["field_errors"]["full_name"][0],
            "Full name cannot be empty."
        );
        assert_eq!(
            body["field_errors"]["position"][0],
            "Position cannot be empty."
        );
    }

    #[tokio::test]
    async fn test_social_url_and_platform_are_validated() {
        let server = server();

        let response = server
            .post("/api/socials")
            .authorization_bearer("s3cret")
            .json(&json!({ "team": 1, "platform": "github", "url": "nope" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field_errors"]["url"][0], "Enter a valid URL.");

        server
            .post("/api/socials")
            .authorization_bearer("s3cret")
            .json(&json!({ "team": 1, "platform": "myspace", "url": "https://x.io" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
