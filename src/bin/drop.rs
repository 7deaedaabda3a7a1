//! Drops every catalog table. The next server start or `populate` run
//! recreates the schema.

use library_catalog::{config::AppConfig, repository, seed, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    telemetry::init(&config.logging, "drop");

    let pool = repository::connect(&config.database).await?;
    seed::drop_all(&pool).await?;
    pool.close().await;

    tracing::info!("Database dropped");
    Ok(())
}
