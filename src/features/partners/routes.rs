use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;

use crate::features::partners::handlers;
use crate::features::partners::models::LookupKind;
use crate::features::partners::services::{
    ContributorService, LookupService, PartnerService, SponsorService, SupporterService,
};
use crate::shared::media::MediaUrls;

/// Create routes for the four lookup tables
///
/// Reads are public; writes require the admin key.
pub fn lookup_routes(pool: PgPool) -> Router {
    LookupKind::ALL.into_iter().fold(Router::new(), |router, kind| {
        let service = Arc::new(LookupService::new(pool.clone(), kind));
        router.merge(
            Router::new()
                .route(
                    kind.collection_path(),
                    get(handlers::list_lookups).post(handlers::create_lookup),
                )
                .route(
                    &kind.item_path(),
                    get(handlers::get_lookup)
                        .put(handlers::update_lookup)
                        .delete(handlers::delete_lookup),
                )
                .with_state(service),
        )
    })
}

/// Create routes for partners, contributors, sponsors and supporters
pub fn routes(pool: PgPool, media: MediaUrls) -> Router {
    let partners = Arc::new(PartnerService::new(pool.clone(), media.clone()));
    let contributors = Arc::new(ContributorService::new(pool.clone(), media.clone()));
    let sponsors = Arc::new(SponsorService::new(pool.clone(), media.clone()));
    let supporters = Arc::new(SupporterService::new(pool, media));

    Router::new()
        .merge(
            Router::new()
                .route(
                    "/api/partners",
                    get(handlers::list_partners).post(handlers::create_partner),
                )
                .route(
                    "/api/partners/{id}",
                    get(handlers::get_partner)
                        .put(handlers::update_partner)
                        .delete(handlers::delete_partner),
                )
                .with_state(partners),
        )
        .merge(
            Router::new()
                .route(
                    "/api/contributors",
                    get(handlers::list_contributors).post(handlers::create_contributor),
                )
                .route(
                    "/api/contributors/{id}",
                    get(handlers::get_contributor)
                        .put(handlers::update_contributor)
                        .delete(handlers::delete_contributor),
                )
                .with_state(contributors),
        )
        .merge(
            Router::new()
                .route(
                    "/api/sponsors",
                    get(handlers::list_sponsors).post(handlers::create_sponsor),
                )
                .route(
                    "/api/sponsors/{id}",
                    get(handlers::get_sponsor)
                        .put(handlers::update_sponsor)
                        .delete(handlers::delete_sponsor),
                )
                .with_state(sponsors),
        )
        .merge(
            Router::new()
                .route(
                    "/api/supporters",
                    get(handlers::list_supporters).post(handlers::create_supporter),
                )
                .route(
                    "/api/supporters/{id}",
                    get(handlers::get_supporter)
                        .put(handlers::update_supporter)
                        .delete(handlers::delete_supporter),
                )
                .with_state(supporters),
        )
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
        let app = routes(lazy_pool(), MediaUrls::new("http://media.test"))
            .merge(lookup_routes(lazy_pool()))
            .layer(Extension(Arc::new(AdminAccess::new(Some(
                "s3cret".to_string(),
            )))));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_writes_require_admin_key() {
        let server = server();

        for path in [
            "/api/partners",
            "/api/contributors",
            "/api/sponsors",
            "/api/supporters",
            "/api/partner-tiers",
            "/api/sponsor-levels",
        ] {
            server
                .post(path)
                .json(&json!({}))
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }

        server
            .delete("/api/contributor-roles/1")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_include_inactive_requires_admin_key() {
        let server = server();

        server
            .get("/api/sponsors")
            .add_query_param("include_inactive", true)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_urls_are_field_errors() {
        let server = server();

        let response = server
            .post("/api/contributors")
            .authorization_bearer("s3cret")
            .json(&json!({
                "full_name": "Grace Hopper",
                "github": "github.com/grace",
                "email": "not-an-email"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field_errors"]["github"][0], "Enter a valid URL.");
        assert_eq!(
            body["field_errors"]["email"][0],
            "Enter a valid email address."
        );
    }

    #[tokio::test]
    async fn test_blank_and_padded_links_pass_validation() {
        let server = server();

        // Only the blank name fails; the link fields are accepted as sent
        let response = server
            .post("/api/contributors")
            .authorization_bearer("s3cret")
            .json(&json!({
                "full_name": " ",
                "website": "",
                "github": "  https://github.com/grace ",
                "email": "  Grace@Example.com "
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field_errors"]["full_name"][0], "Full name cannot be empty.");
        assert!(body["field_errors"].get("website").is_none());
        assert!(body["field_errors"].get("github").is_none());
        assert!(body["field_errors"].get("email").is_none());

        let response = server
            .post("/api/supporters")
            .authorization_bearer("s3cret")
            .json(&json!({ "name": "", "website": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["field_errors"].get("website").is_none());
        assert_eq!(body["field_errors"]["name"][0], "Name cannot be empty.");
    }

    #[tokio::test]
    async fn test_blank_supporter_name_is_rejected() {
        let server = server();

        let response = server
            .post("/api/supporters")
            .authorization_bearer("s3cret")
            .json(&json!({ "name": "  " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["field_errors"]["name"][0], "Name cannot be empty.");
    }

    #[tokio::test]
    async fn test_unknown_lookup_id_format_is_not_found() {
        let server = server();

        server
            .get("/api/partner-types/abc")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
