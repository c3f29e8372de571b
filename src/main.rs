//! Catalog Server: product catalog over PostgreSQL.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use catalog_api::{AppState, run_server};
use catalog_core::config::AppConfig;
use catalog_core::error::AppError;
use catalog_database::DatabasePool;
use catalog_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `CATALOG_ENV` overlay and `CATALOG__*`
/// environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CATALOG_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing. `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting catalog server");

    // ── Step 1: Database connection ──────────────────────────────
    let database = DatabasePool::connect(&config.database).await?;

    // ── Step 2: Migrations ───────────────────────────────────────
    if config.database.run_migrations {
        run_migrations(database.pool()).await?;
    } else {
        tracing::info!("Skipping database migrations");
    }

    // ── Step 3: Serve until shutdown ─────────────────────────────
    let state = AppState::new(config, database.clone());
    let result = run_server(state).await;

    database.close().await;
    result
}
