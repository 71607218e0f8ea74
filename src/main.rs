mod core;
mod features;
mod modules;
mod shared;

use crate::core::app::{self, ApiServices};
use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::repositories::PgRefreshTokenRepository;
use crate::features::auth::{JwtValidator, TokenService};
use crate::features::users::repositories::PgUserRepository;
use crate::features::users::UserService;
use crate::features::videos::repositories::{PgCommentRepository, PgVideoRepository};
use crate::features::videos::{CommentService, VideoService};
use crate::modules::storage::{ObjectRelocator, PgOrphanLedger, S3Client};
use crate::shared::constants::ORPHAN_SWEEP_BATCH;
use axum::{extract::State, http::StatusCode, middleware::from_fn, Router};
use sqlx::PgPool;
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
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Object storage
    let s3_client = Arc::new(
        S3Client::new(&config.s3).map_err(|e| anyhow::anyhow!("Failed to create S3 client: {}", e))?,
    );
    s3_client.ensure_bucket_exists().await;
    tracing::info!("S3 client initialized for bucket: {}", s3_client.bucket_name());

    let relocator = Arc::new(ObjectRelocator::new(
        s3_client,
        Arc::new(PgOrphanLedger::new(pool.clone())),
        config.s3.public_base_url.clone(),
    ));

    // Drain objects left behind by interrupted moves
    match relocator.sweep_orphans(ORPHAN_SWEEP_BATCH).await {
        Ok(0) => tracing::debug!("No orphaned objects to sweep"),
        Ok(swept) => tracing::info!("Swept {} orphaned objects", swept),
        Err(e) => tracing::warn!("Orphan sweep failed: {}", e),
    }

    // Auth
    let jwt_validator = Arc::new(JwtValidator::new(&config.auth_token));
    let token_service = Arc::new(TokenService::new(
        config.auth_token.clone(),
        Arc::clone(&jwt_validator),
        Arc::new(PgRefreshTokenRepository::new(pool.clone())),
    ));
    tracing::info!("Token service initialized");

    let user_service = Arc::new(UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::clone(&token_service),
    ));
    tracing::info!("User service initialized");

    let video_repository = Arc::new(PgVideoRepository::new(pool.clone()));
    let video_service = Arc::new(VideoService::new(
        video_repository.clone(),
        Arc::clone(&relocator),
    ));
    let comment_service = Arc::new(CommentService::new(
        Arc::new(PgCommentRepository::new(pool.clone())),
        video_repository,
    ));
    tracing::info!("Video and comment services initialized");

    let services = ApiServices {
        jwt_validator,
        token_service,
        user_service,
        video_service,
        comment_service,
    };

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

    async fn health_check(State(pool): State<PgPool>) -> StatusCode {
        match database::ping(&pool).await {
            Ok(()) => StatusCode::OK,
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
    let health_route = Router::new()
        .route("/health", axum::routing::get(health_check))
        .with_state(pool);

    let app = Router::new()
        .merge(swagger)
        .merge(app::api_routes(&services, config.app.max_upload_size))
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

    // Start server
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

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

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
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
