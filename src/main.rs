mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::{database, openapi, router, server};
use crate::features::reference::store::PgReferenceStore;
use crate::features::reference::ReferenceService;
use crate::modules::storage::ScratchStorage;
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    let worker_threads = server::worker_threads();
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

    // Load configuration
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

    // Create database connection pool
    let pool = database::create_pool(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Scratch directories for imports and exports
    let scratch = Arc::new(ScratchStorage::new(&config.scratch));
    scratch
        .ensure_dirs()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create scratch directories: {}", e))?;
    tracing::info!(
        "Scratch storage ready (uploads: {}, exports: {}, retention: {}s)",
        config.scratch.upload_dir.display(),
        config.scratch.export_dir.display(),
        config.scratch.retention.as_secs()
    );

    // Initialize Reference Service
    let store = Arc::new(PgReferenceStore::new(pool));
    let reference_service = Arc::new(ReferenceService::new(store));
    tracing::info!(
        "Reference service initialized for {} entities",
        features::all_entities().len()
    );

    let swagger = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", openapi::document(&config.swagger));
    let app = router::with_transport_layers(
        Router::new()
            .merge(swagger)
            .merge(router::api_router(reference_service, scratch)),
        &config.app,
    );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let listener = server::bind_listener(socket_addr)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;
    tracing::info!("Server stopped");

    Ok(())
}
