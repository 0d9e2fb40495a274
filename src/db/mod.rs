use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::Path;
use std::time::Duration;

pub mod seed;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool, dir: &str) -> anyhow::Result<()> {
    let migrator = Migrator::new(Path::new(dir)).await?;
    migrator.run(pool).await?;
    tracing::info!(dir, "Database migrations completed");
    Ok(())
}
