//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use catalog_core::config::AppConfig;
use catalog_core::traits::Repository;
use catalog_database::{DatabasePool, ProductRepository};
use catalog_entity::Product;

use crate::controllers::ProductsController;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool; `None` when the controller runs over another store.
    pub database: Option<DatabasePool>,
    /// Products controller.
    pub products: Arc<ProductsController>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn new(config: AppConfig, database: DatabasePool) -> Self {
        let repository = Arc::new(ProductRepository::new(database.context()));
        Self {
            config: Arc::new(config),
            database: Some(database),
            products: Arc::new(ProductsController::new(repository)),
        }
    }

    /// State over an arbitrary product repository, with no database.
    pub fn with_repository(config: AppConfig, repository: Arc<dyn Repository<Product>>) -> Self {
        Self {
            config: Arc::new(config),
            database: None,
            products: Arc::new(ProductsController::new(repository)),
        }
    }
}
