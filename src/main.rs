use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use footballx_core::cli::{self, Cli, Commands, DbCommands};
use footballx_core::config::{Config, LogFormat};
use footballx_core::db::{self, seed};
use footballx_core::startup::validate_environment;
use footballx_core::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    match Cli::parse().command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Db(DbCommands::Migrate) => cli::handle_db_migrate(&config).await,
        Commands::Db(DbCommands::Seed) => cli::handle_db_seed(&config).await,
        Commands::Config => cli::handle_config_validate(&config).await,
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Plain => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let state = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool, &config.migrations_dir).await?;

            let report = validate_environment(&config, Some(&pool)).await;
            if !report.is_valid() {
                report.print();
                anyhow::bail!("Startup validation failed");
            }

            AppState::postgres(pool, &config)
        }
        None => {
            let report = validate_environment(&config, None).await;
            if !report.is_valid() {
                report.print();
                anyhow::bail!("Startup validation failed");
            }

            tracing::warn!("DATABASE_URL not set, using in-memory storage; data is lost on exit");
            AppState::in_memory(&config)
        }
    };

    seed::seed_catalog(state.catalog.as_ref()).await?;

    let app = create_app(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
