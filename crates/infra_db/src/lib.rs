//! Infrastructure Database Layer
//!
//! This crate provides the persistence side of the booking data layer: a
//! PostgreSQL connection pool with per-table repositories, and an in-memory
//! alternative seeded from JSON fixtures.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL for one
//! table and map rows to plain row structs; adapters implement the domain's
//! `BookingPort` on top of them and translate errors.
//!
//! ```text
//! BookingPort ──► PostgresBookingAdapter ──► {User,Reservation,Property}Repository ──► PgPool
//!             └─► FixtureBookingAdapter  ──► FixtureSet (users.json, properties.json, ...)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresBookingAdapter};
//!
//! let config = DatabaseConfig::from_parts("localhost", 5432, "vagrant", "123", "lightbnb");
//! let pool = create_pool(config).await?;
//! let port = PostgresBookingAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod fixtures;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use fixtures::{FixtureSet, FixtureError};
pub use adapters::{PostgresBookingAdapter, FixtureBookingAdapter};
