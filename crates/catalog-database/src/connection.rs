//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use catalog_core::config::DatabaseConfig;
use catalog_core::result::AppResult;

use crate::context::DbContext;
use crate::error::storage_error;

/// Shared handle to the catalog's connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool sized and timed from `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| storage_error("Failed to connect to database", e))?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wrap an already-open pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A persistence context over this pool.
    pub fn context(&self) -> DbContext {
        DbContext::new(self.pool.clone())
    }

    /// Round-trip a trivial query to verify connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Database ping failed", e))?;
        debug!(result = one, "Database ping");
        Ok(())
    }

    /// Close every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replace the password in a connection URL with `****`.
pub fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at) = url[scheme_end..].rfind('@').map(|p| p + scheme_end) else {
        return url.to_string();
    };
    match url[scheme_end..at].find(':') {
        Some(colon) => {
            let colon = colon + scheme_end;
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        None => url.to_string(),
    }
}
