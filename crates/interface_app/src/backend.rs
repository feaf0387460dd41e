//! Backend selection
//!
//! Builds the configured `BookingPort` implementation behind a trait object
//! so callers never name a concrete adapter.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use domain_booking::BookingPort;
use infra_db::{
    create_pool, DatabaseError, FixtureBookingAdapter, FixtureError, PostgresBookingAdapter,
};

use crate::config::{AppConfig, BackendKind};

/// Errors raised while building a backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to create database pool: {0}")]
    Database(#[from] DatabaseError),

    #[error("Failed to load fixtures: {0}")]
    Fixtures(#[from] FixtureError),
}

/// Creates the booking port selected by `config.backend`
///
/// # Errors
///
/// Returns `BackendError::Database` if the pool cannot connect, or
/// `BackendError::Fixtures` if the fixture directory cannot be loaded.
pub async fn build_backend(config: &AppConfig) -> Result<Arc<dyn BookingPort>, BackendError> {
    match config.backend {
        BackendKind::Postgres => {
            let pool = create_pool(config.database_config()?).await?;
            info!(database = %config.db_name, "Using PostgreSQL backend");
            Ok(Arc::new(PostgresBookingAdapter::new(pool)))
        }
        BackendKind::Fixtures => {
            let adapter = FixtureBookingAdapter::load(&config.fixtures_dir).await?;
            info!(dir = %config.fixtures_dir.display(), "Using fixture backend");
            Ok(Arc::new(adapter))
        }
    }
}
