//! LightBnB data layer start-up check
//!
//! Builds the configured backend, checks its health and looks up user 1,
//! which is enough to confirm the store is reachable and seeded.
//!
//! # Usage
//!
//! ```bash
//! # PostgreSQL on localhost as vagrant/123
//! cargo run --bin lightbnb-db
//!
//! # JSON fixtures
//! LIGHTBNB_BACKEND=fixtures LIGHTBNB_FIXTURES_DIR=server/json cargo run --bin lightbnb-db
//! ```
//!
//! # Environment Variables
//!
//! * `LIGHTBNB_BACKEND` - `postgres` or `fixtures` (default: postgres)
//! * `LIGHTBNB_DATABASE_URL` - connection URL, overrides the parts below
//! * `LIGHTBNB_DB_HOST`, `LIGHTBNB_DB_PORT`, `LIGHTBNB_DB_USER`,
//!   `LIGHTBNB_DB_PASSWORD`, `LIGHTBNB_DB_NAME` - connection parts
//! * `LIGHTBNB_DB_MAX_CONNECTIONS` - pool size (default: 10)
//! * `LIGHTBNB_FIXTURES_DIR` - fixture directory (default: server/json)
//! * `LIGHTBNB_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `LIGHTBNB_LOG_FORMAT` - `text` or `json` (default: text)

use anyhow::Context;
use core_kernel::{HealthCheckable, UserId};
use domain_booking::BookingPort;
use interface_app::{build_backend, init_tracing, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid LIGHTBNB_* configuration")?;
    init_tracing(&config.log_level, config.log_format);

    tracing::info!(backend = ?config.backend, "Starting LightBnB data layer");

    let port = build_backend(&config).await.context("Failed to build backend")?;

    let health = port.health_check().await;
    if !health.is_healthy() {
        anyhow::bail!(
            "{} is {:?}: {}",
            health.adapter_id,
            health.status,
            health.message.unwrap_or_default()
        );
    }
    tracing::info!(latency_ms = health.latency_ms, "Backend healthy");

    match port.get_user_with_id(UserId::new(1)).await? {
        Some(user) => tracing::info!(user_id = %user.id, name = %user.name, "First user found"),
        None => tracing::warn!("No user with id 1; the store is empty"),
    }

    Ok(())
}
