mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::guards::AdminAccess;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::newsletter::{routes as newsletter_routes, SubscriberService};
use crate::features::notifications::NotificationService;
use crate::features::partners::routes as partners_routes;
use crate::features::teams::{
    routes as teams_routes, PgSocialRepository, SocialService, TeamService,
};
use crate::features::workshops::{
    routes as workshops_routes, seed, PgRegistrationRepository, RegistrationService,
    WorkshopService,
};
use crate::modules::mail::mailer_from_config;
use crate::shared::media::MediaUrls;
use crate::shared::templates::TemplateRenderer;
use axum::{middleware::from_fn, Extension, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    if config.app.seed_sample_data {
        let report = seed::seed_sample_data(&pool, chrono::Utc::now().date_naive()).await?;
        tracing::info!(
            "Sample data seeded: workshops_created={}, registrations_created={}",
            report.workshops_created,
            report.registrations_created
        );
    }

    // Admin key for management routes
    let admin_access = Arc::new(AdminAccess::new(config.app.admin_api_key.clone()));
    if !admin_access.is_enabled() {
        tracing::warn!("ADMIN_API_KEY not set, management routes are open to everyone");
    }

    // Outbound email
    let mailer = mailer_from_config(&config.mail)
        .map_err(|e| anyhow::anyhow!("Failed to initialize mailer: {}", e))?;
    let templates = Arc::new(TemplateRenderer::from_dir(&config.mail.template_dir));
    tracing::info!(
        "Email templates loaded from {}: {}",
        config.mail.template_dir,
        templates.names().len()
    );
    let notification_service = Arc::new(NotificationService::new(
        mailer,
        templates,
        config.mail.organization_name.clone(),
    ));

    let media = MediaUrls::new(config.app.media_base_url.clone());

    // Workshops and registrations
    let workshop_service = Arc::new(WorkshopService::new(
        pool.clone(),
        media.clone(),
        Arc::clone(&notification_service),
    ));
    let registration_service = Arc::new(RegistrationService::new(
        Arc::new(PgRegistrationRepository::new(pool.clone())),
        notification_service,
    ));
    tracing::info!("Workshop services initialized");

    let subscriber_service = Arc::new(SubscriberService::new(pool.clone()));
    tracing::info!("Newsletter service initialized");

    let team_service = Arc::new(TeamService::new(pool.clone(), media.clone()));
    let social_service = Arc::new(SocialService::new(Arc::new(PgSocialRepository::new(
        pool.clone(),
    ))));
    tracing::info!("Team services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public reads and admin writes share routers; handlers carry the guards
    let api_routes = Router::new()
        .merge(workshops_routes::routes(workshop_service))
        .merge(workshops_routes::registration_routes(registration_service))
        .merge(newsletter_routes::routes(subscriber_service))
        .merge(partners_routes::lookup_routes(pool.clone()))
        .merge(partners_routes::routes(pool.clone(), media))
        .merge(teams_routes::routes(team_service))
        .merge(teams_routes::social_routes(social_service))
        .layer(Extension(admin_access));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
