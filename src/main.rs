//! Library Catalog Server
//!
//! Serves the authors/books REST API and the browser client.

use std::net::SocketAddr;
use std::sync::Arc;

use library_catalog::{
    api,
    config::AppConfig,
    repository::{self, Repository},
    services::Services,
    telemetry, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    telemetry::init(&config.logging, "library_catalog");

    tracing::info!("Starting Library Catalog v{}", env!("CARGO_PKG_VERSION"));

    let pool = repository::connect(&config.database).await?;
    tracing::info!("Connected to database");

    repository::MIGRATOR.run(&pool).await?;
    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Serving static files from {}", config.server.static_dir);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(Repository::new(pool))),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
