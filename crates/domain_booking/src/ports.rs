//! Booking Domain Ports
//!
//! This module defines the port interface for the booking data layer,
//! enabling swappable implementations:
//!
//! - **PostgreSQL Adapter**: parameterized SQL over a shared connection pool (infra_db)
//! - **Fixture Adapter**: in-memory tables seeded from JSON files (infra_db)
//!
//! # Result conventions
//!
//! - Lookups return `Ok(None)` when no row matches.
//! - Listings return `Ok(vec![])` when no row matches.
//! - Invalid input is `PortError::Validation`; nothing is written.
//! - Storage failures (connection, constraint violation) are returned as
//!   `PortError` and never swallowed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_booking::{BookingPort, PropertySearch};
//! use std::sync::Arc;
//!
//! pub struct ListingsPage {
//!     port: Arc<dyn BookingPort>,
//! }
//!
//! impl ListingsPage {
//!     pub async fn cheapest_in(&self, city: &str) -> Result<Vec<PropertyListing>, PortError> {
//!         self.port
//!             .get_all_properties(&PropertySearch::new().in_city(city), None)
//!             .await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError, UserId};

use crate::property::{NewProperty, Property, PropertyListing};
use crate::reservation::ReservationDetails;
use crate::search::{PropertySearch, DEFAULT_LIMIT};
use crate::user::{NewUser, User};

/// Resolves an optional caller limit to the row cap actually applied
pub fn effective_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT)
}

/// Port interface for booking data access
///
/// Every operation is a single, independent, at-most-once call against the
/// backing store. No operation holds state across calls.
#[async_trait]
pub trait BookingPort: DomainPort + HealthCheckable {
    // ========================================================================
    // Users
    // ========================================================================

    /// Gets the user whose email matches exactly
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, PortError>;

    /// Gets the user with the given id
    async fn get_user_with_id(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Registers a user and returns the stored record with its new id
    ///
    /// # Errors
    ///
    /// `Validation` when a field is missing or the email is malformed,
    /// `Conflict` when the email is already registered.
    async fn add_user(&self, user: NewUser) -> Result<User, PortError>;

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Lists a guest's reservations, earliest start date first
    ///
    /// # Arguments
    ///
    /// * `guest_id` - Only reservations made by this user are returned
    /// * `limit` - Maximum number of rows, `DEFAULT_LIMIT` when `None`
    async fn get_all_reservations(
        &self,
        guest_id: UserId,
        limit: Option<u32>,
    ) -> Result<Vec<ReservationDetails>, PortError>;

    // ========================================================================
    // Properties
    // ========================================================================

    /// Lists reviewed properties matching every option in `search`, cheapest first
    ///
    /// # Arguments
    ///
    /// * `search` - Optional filters combined with AND
    /// * `limit` - Maximum number of rows, `DEFAULT_LIMIT` when `None`
    async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: Option<u32>,
    ) -> Result<Vec<PropertyListing>, PortError>;

    /// Lists a new property and returns the stored record with its new id
    ///
    /// # Errors
    ///
    /// `Validation` when a field is invalid, `Conflict` when the owner does
    /// not exist.
    async fn add_property(&self, property: NewProperty) -> Result<Property, PortError>;
}

/// Extension trait for BookingPort with convenience methods
#[async_trait]
pub trait BookingPortExt: BookingPort {
    /// Gets a user or returns NotFound error
    async fn get_user_required(&self, id: UserId) -> Result<User, PortError> {
        self.get_user_with_id(id)
            .await?
            .ok_or_else(|| PortError::not_found("User", id))
    }

    /// Gets a user by email or returns NotFound error
    async fn get_user_with_email_required(&self, email: &str) -> Result<User, PortError> {
        self.get_user_with_email(email)
            .await?
            .ok_or_else(|| PortError::not_found("User", email))
    }

    /// Looks up a user by email and checks the supplied password
    ///
    /// Returns `None` for an unknown email or a wrong password. The password
    /// is compared as stored; hashing is the caller's concern.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, PortError> {
        Ok(self
            .get_user_with_email(email)
            .await?
            .filter(|user| user.password_matches(password)))
    }
}

impl<T: BookingPort + ?Sized> BookingPortExt for T {}
