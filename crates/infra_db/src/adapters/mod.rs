//! Booking Port Adapters
//!
//! This module provides the two implementations of `BookingPort`:
//!
//! - `PostgresBookingAdapter`: repositories over a shared connection pool
//! - `FixtureBookingAdapter`: in-memory tables seeded from JSON fixtures
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresBookingAdapter, FixtureBookingAdapter};
//! use domain_booking::BookingPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn BookingPort> = if use_database {
//!     Arc::new(PostgresBookingAdapter::new(pool))
//! } else {
//!     Arc::new(FixtureBookingAdapter::load("server/json").await?)
//! };
//! ```

pub mod postgres;
pub mod fixture;

pub use postgres::PostgresBookingAdapter;
pub use fixture::FixtureBookingAdapter;
