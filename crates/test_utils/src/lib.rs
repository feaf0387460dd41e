//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! booking data layer test suite.
//!
//! # Modules
//!
//! - `fixtures`: A small, fully known LightBnB data set
//! - `builders`: Builder patterns for new users and properties
//! - `database`: PostgreSQL test container with the LightBnB schema
//! - `assertions`: Ordering and shape checks for query results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
