//! Replaces the catalog contents with synthetic authors and books.

use rand::{rngs::StdRng, SeedableRng};

use library_catalog::{
    config::AppConfig,
    repository::{self, Repository},
    seed, telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    telemetry::init(&config.logging, "populate");

    let pool = repository::connect(&config.database).await?;
    repository::MIGRATOR.run(&pool).await?;
    tracing::info!("Connected to database");

    let mut rng = StdRng::from_entropy();
    let summary = seed::populate(&Repository::new(pool.clone()), &config.seed, &mut rng).await?;
    pool.close().await;

    tracing::info!(
        "Database populated with {} author(s) and {} book(s)",
        summary.authors,
        summary.books
    );
    Ok(())
}
