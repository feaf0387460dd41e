//! Reservations

use chrono::NaiveDate;
use core_kernel::{PropertyId, ReservationId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::property::Property;

/// A reservation as stored in `reservations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub property_id: PropertyId,
    pub guest_id: UserId,
    pub start_date: NaiveDate,
}

/// A guest's reservation joined with the reserved property
///
/// `average_rating` is `None` when the property has not been reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDetails {
    pub id: ReservationId,
    pub guest_id: UserId,
    pub start_date: NaiveDate,
    pub property: Property,
    pub average_rating: Option<Decimal>,
}
