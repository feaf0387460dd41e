//! Reservation repository implementation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ReservationId, UserId};
use domain_booking::ReservationDetails;

use crate::error::DatabaseError;
use crate::repositories::property::PropertyRow;

/// Repository for the `reservations` table
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a guest's reservations with the reserved property and its rating
    ///
    /// Reviews are left-joined so a reservation on an unreviewed property is
    /// still listed, with a NULL average.
    ///
    /// # Arguments
    ///
    /// * `guest_id` - The guest whose reservations are listed
    /// * `limit` - Maximum number of rows returned
    pub async fn find_by_guest(
        &self,
        guest_id: i32,
        limit: u32,
    ) -> Result<Vec<ReservationDetailsRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReservationDetailsRow>(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.start_date,
                properties.*,
                avg(property_reviews.rating) AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// A reservation joined with its property and the property's average rating
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReservationDetailsRow {
    pub reservation_id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: PropertyRow,
    pub average_rating: Option<Decimal>,
}

impl From<ReservationDetailsRow> for ReservationDetails {
    fn from(row: ReservationDetailsRow) -> Self {
        ReservationDetails {
            id: ReservationId::new(row.reservation_id),
            guest_id: UserId::new(row.guest_id),
            start_date: row.start_date,
            property: row.property.into(),
            average_rating: row.average_rating,
        }
    }
}
