//! PostgreSQL Booking Adapter
//!
//! This module implements `BookingPort` on top of the table repositories.
//! It:
//!
//! - Validates new records before they reach the database
//! - Converts row types back to domain records
//! - Translates `DatabaseError` into `PortError` and logs the failure
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresBookingAdapter;
//! use domain_booking::BookingPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn BookingPort> = Arc::new(PostgresBookingAdapter::new(pool));
//! let user = port.get_user_with_email("tristanjacobs@gmail.com").await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, error, instrument, warn};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, UserId,
};
use domain_booking::{
    effective_limit, BookingPort, BookingValidator, NewProperty, NewUser, Property,
    PropertyListing, PropertySearch, ReservationDetails, User,
};

use crate::error::DatabaseError;
use crate::repositories::{PropertyRepository, ReservationRepository, UserRepository};

const ADAPTER_ID: &str = "postgres-booking-adapter";

/// PostgreSQL-backed implementation of the BookingPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - Unique and foreign-key violations -> `PortError::Conflict`
/// - Connection failures and pool timeouts -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresBookingAdapter {
    users: UserRepository,
    reservations: ReservationRepository,
    properties: PropertyRepository,
    pool: PgPool,
}

impl PostgresBookingAdapter {
    /// Creates a new PostgreSQL booking adapter sharing `pool`
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            properties: PropertyRepository::new(pool.clone()),
            pool,
        }
    }
}

fn port_error(operation: &'static str) -> impl FnOnce(DatabaseError) -> PortError {
    move |e| {
        if e.is_connection_error() {
            warn!(operation, error = %e, "Database unavailable");
        } else {
            error!(operation, error = %e, "Database operation failed");
        }
        PortError::from(e)
    }
}

impl DomainPort for PostgresBookingAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBookingAdapter {
    /// Runs `SELECT 1` to verify the pool can serve a query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl BookingPort for PostgresBookingAdapter {
    #[instrument(skip(self, email))]
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, PortError> {
        debug!("Fetching user by email");

        let row = self
            .users
            .find_by_email(email)
            .await
            .map_err(port_error("get_user_with_email"))?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user_with_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        debug!("Fetching user by ID");

        let row = self
            .users
            .find_by_id(id.value())
            .await
            .map_err(port_error("get_user_with_id"))?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self, user))]
    async fn add_user(&self, user: NewUser) -> Result<User, PortError> {
        BookingValidator::validate_user(&user)?;

        let row = self
            .users
            .insert(&user)
            .await
            .map_err(port_error("add_user"))?;

        debug!(user_id = row.id, "User created");
        Ok(row.into())
    }

    #[instrument(skip(self), fields(guest_id = %guest_id))]
    async fn get_all_reservations(
        &self,
        guest_id: UserId,
        limit: Option<u32>,
    ) -> Result<Vec<ReservationDetails>, PortError> {
        let rows = self
            .reservations
            .find_by_guest(guest_id.value(), effective_limit(limit))
            .await
            .map_err(port_error("get_all_reservations"))?;

        debug!(count = rows.len(), "Reservations fetched");
        Ok(rows.into_iter().map(ReservationDetails::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: Option<u32>,
    ) -> Result<Vec<PropertyListing>, PortError> {
        let rows = self
            .properties
            .search(search, effective_limit(limit))
            .await
            .map_err(port_error("get_all_properties"))?;

        debug!(count = rows.len(), "Properties fetched");
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    #[instrument(skip(self, property), fields(owner_id = %property.owner_id))]
    async fn add_property(&self, property: NewProperty) -> Result<Property, PortError> {
        BookingValidator::validate_property(&property)?;

        let row = self
            .properties
            .insert(&property)
            .await
            .map_err(port_error("add_property"))?;

        debug!(property_id = row.id, "Property created");
        Ok(row.into())
    }
}
