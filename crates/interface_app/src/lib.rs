//! Application Layer
//!
//! Wires configuration to a concrete booking backend. Route handlers and
//! other callers hold an `Arc<dyn BookingPort>` from [`build_backend`] and
//! stay unaware of whether PostgreSQL or JSON fixtures sit behind it.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_app::{build_backend, AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! let port = build_backend(&config).await?;
//! let user = port.get_user_with_email("tristanjacobs@gmail.com").await?;
//! ```

pub mod config;
pub mod backend;
pub mod telemetry;

pub use crate::config::{AppConfig, BackendKind};
pub use crate::backend::{build_backend, BackendError};
pub use crate::telemetry::{init_tracing, LogFormat};
