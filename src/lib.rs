//! Game Rental Server
//!
//! REST JSON API for a video game rental shop: consoles, genres, games,
//! customers, users, and the rental/return transactions that move copies
//! in and out of stock.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use crate::config::AppConfig;
pub use crate::error::{AppError, AppResult};

use crate::config::{DatabaseConfig, StoreBackend};
use crate::repository::{PgStore, Repository, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services over a repository
    pub fn new(config: AppConfig, repository: Repository) -> Self {
        let services = services::Services::new(repository, config.auth.clone(), config.catalog.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

/// Open the configured document store, running migrations for Postgres
pub async fn connect_repository(config: &DatabaseConfig) -> Result<Repository, StoreError> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(config).await?;
            tracing::info!("Connected to database");
            store.migrate().await?;
            tracing::info!("Database migrations completed");
            Ok(Repository::new(Arc::new(store)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(Repository::in_memory())
        }
    }
}
