//! Fixture Booking Adapter
//!
//! In-memory implementation of `BookingPort` seeded from JSON fixtures. It
//! answers every operation the way the SQL adapter would on the same data:
//!
//! - property listings only include reviewed properties, grouped per
//!   property, cheapest first with ties broken by id
//! - reservations are the guest's own, earliest start date first, with the
//!   property's average rating or `None` when unreviewed
//! - inserts assign the next id after the current maximum and enforce the
//!   unique email and the owner reference
//!
//! Tables sit behind a single `RwLock`; inserts take the write lock so ids
//! are assigned one at a time.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError, PropertyId, UserId,
};
use domain_booking::{
    average_rating, effective_limit, BookingPort, BookingValidator, NewProperty, NewUser,
    Property, PropertyListing, PropertySearch, ReservationDetails, User,
};

use crate::fixtures::{FixtureError, FixtureSet};

const ADAPTER_ID: &str = "fixture-booking-adapter";

/// JSON-seeded, in-memory implementation of the BookingPort trait
#[derive(Debug, Clone, Default)]
pub struct FixtureBookingAdapter {
    tables: Arc<RwLock<FixtureSet>>,
}

impl FixtureBookingAdapter {
    /// Creates an adapter over already-decoded fixtures
    pub fn new(fixtures: FixtureSet) -> Self {
        Self {
            tables: Arc::new(RwLock::new(fixtures)),
        }
    }

    /// Loads fixtures from `dir` and creates an adapter over them
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Ok(Self::new(FixtureSet::load_dir(dir).await?))
    }

    /// Returns a copy of the current tables
    pub async fn snapshot(&self) -> FixtureSet {
        self.tables.read().await.clone()
    }
}

fn ratings_by_property(tables: &FixtureSet) -> HashMap<PropertyId, Vec<i16>> {
    let mut ratings: HashMap<PropertyId, Vec<i16>> = HashMap::new();
    for review in &tables.reviews {
        ratings.entry(review.property_id).or_default().push(review.rating);
    }
    ratings
}

fn ids_exhausted(entity: &str) -> PortError {
    error!(entity, "Id space exhausted");
    PortError::internal(format!("no {} id left after {}", entity, i32::MAX))
}

fn limit_as_len(limit: Option<u32>) -> usize {
    usize::try_from(effective_limit(limit)).unwrap_or(usize::MAX)
}

impl DomainPort for FixtureBookingAdapter {}

#[async_trait]
impl HealthCheckable for FixtureBookingAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("In-memory fixtures".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl BookingPort for FixtureBookingAdapter {
    #[instrument(skip(self, email))]
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user_with_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    #[instrument(skip(self, user))]
    async fn add_user(&self, user: NewUser) -> Result<User, PortError> {
        BookingValidator::validate_user(&user)?;

        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            warn!("Email already registered");
            return Err(PortError::conflict(format!(
                "user with email '{}' already exists",
                user.email
            )));
        }

        let id = match tables.users.iter().map(|u| u.id).max() {
            None => UserId::new(1),
            Some(max) => max.next().ok_or_else(|| ids_exhausted("user"))?,
        };
        let created = user.into_user(id);
        tables.users.push(created.clone());

        debug!(user_id = %id, "User created");
        Ok(created)
    }

    #[instrument(skip(self), fields(guest_id = %guest_id))]
    async fn get_all_reservations(
        &self,
        guest_id: UserId,
        limit: Option<u32>,
    ) -> Result<Vec<ReservationDetails>, PortError> {
        let tables = self.tables.read().await;
        let ratings = ratings_by_property(&tables);
        let properties: HashMap<PropertyId, &Property> =
            tables.properties.iter().map(|p| (p.id, p)).collect();

        let mut details: Vec<ReservationDetails> = tables
            .reservations
            .iter()
            .filter(|r| r.guest_id == guest_id)
            .filter_map(|r| {
                let property = properties.get(&r.property_id)?;
                Some(ReservationDetails {
                    id: r.id,
                    guest_id: r.guest_id,
                    start_date: r.start_date,
                    property: (*property).clone(),
                    average_rating: ratings
                        .get(&r.property_id)
                        .and_then(|rs| average_rating(rs.iter().copied())),
                })
            })
            .collect();

        details.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        details.truncate(limit_as_len(limit));

        debug!(count = details.len(), "Reservations fetched");
        Ok(details)
    }

    #[instrument(skip(self))]
    async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: Option<u32>,
    ) -> Result<Vec<PropertyListing>, PortError> {
        let tables = self.tables.read().await;
        let ratings = ratings_by_property(&tables);

        let mut listings: Vec<PropertyListing> = tables
            .properties
            .iter()
            .filter_map(|p| {
                let average = average_rating(ratings.get(&p.id)?.iter().copied())?;
                Some(PropertyListing {
                    property: p.clone(),
                    average_rating: average,
                })
            })
            .filter(|listing| search.matches(listing))
            .collect();

        listings.sort_by(|a, b| {
            a.property
                .cost_per_night
                .cmp(&b.property.cost_per_night)
                .then(a.property.id.cmp(&b.property.id))
        });
        listings.truncate(limit_as_len(limit));

        debug!(count = listings.len(), "Properties fetched");
        Ok(listings)
    }

    #[instrument(skip(self, property), fields(owner_id = %property.owner_id))]
    async fn add_property(&self, property: NewProperty) -> Result<Property, PortError> {
        BookingValidator::validate_property(&property)?;

        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == property.owner_id) {
            warn!("Owner does not exist");
            return Err(PortError::conflict(format!(
                "owner {} does not exist",
                property.owner_id
            )));
        }

        let id = match tables.properties.iter().map(|p| p.id).max() {
            None => PropertyId::new(1),
            Some(max) => max.next().ok_or_else(|| ids_exhausted("property"))?,
        };
        let created = property.into_property(id);
        tables.properties.push(created.clone());

        debug!(property_id = %id, "Property created");
        Ok(created)
    }
}
