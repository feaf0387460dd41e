//! Property repository implementation
//!
//! Property search is assembled with `sqlx::QueryBuilder`: each present
//! search option appends one `AND` clause with a positional bind, in the
//! order given by `PropertySearch::predicates`. The rating threshold is an
//! aggregate condition and goes into `HAVING` after the per-property
//! grouping. The inner join on `property_reviews` means unreviewed
//! properties never appear.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use core_kernel::{PricePerNight, PropertyId, UserId};
use domain_booking::{
    like_pattern, NewProperty, PredicateStage, Property, PropertyListing, PropertySearch,
    SearchPredicate,
};

use crate::error::DatabaseError;

const SEARCH_SELECT: &str = "\
SELECT properties.*, avg(property_reviews.rating) AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE 1 = 1";

/// Repository for the `properties` table
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists reviewed properties matching `search`, cheapest first
    ///
    /// # Arguments
    ///
    /// * `search` - Filters to apply; absent options impose no constraint
    /// * `limit` - Maximum number of rows returned
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: u32,
    ) -> Result<Vec<PropertyListingRow>, DatabaseError> {
        let mut query = build_search_query(search, limit);
        debug!(sql = query.sql(), "Running property search");

        let rows = query
            .build_query_as::<PropertyListingRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Inserts a property
    ///
    /// # Returns
    ///
    /// The inserted row, including the generated id
    pub async fn insert(&self, property: &NewProperty) -> Result<PropertyRow, DatabaseError> {
        let row = sqlx::query_as::<_, PropertyRow>(
            r#"
            INSERT INTO properties (
                title,
                description,
                owner_id,
                cover_photo_url,
                thumbnail_photo_url,
                cost_per_night,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms,
                province,
                city,
                country,
                street,
                post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.owner_id.value())
        .bind(&property.cover_photo_url)
        .bind(&property.thumbnail_photo_url)
        .bind(property.cost_per_night.minor_units())
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.province)
        .bind(&property.city)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.post_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// Builds the property search statement
///
/// Positional placeholders are numbered in the order clauses are appended,
/// with the limit always bound last.
pub fn build_search_query(search: &PropertySearch, limit: u32) -> QueryBuilder<'static, Postgres> {
    let predicates = search.predicates();
    let mut query = QueryBuilder::new(SEARCH_SELECT);

    for predicate in predicates.iter().filter(|p| p.stage() == PredicateStage::Row) {
        push_predicate(&mut query, predicate);
    }

    query.push("\nGROUP BY properties.id");

    let mut having = predicates
        .iter()
        .filter(|p| p.stage() == PredicateStage::Aggregate)
        .peekable();
    if having.peek().is_some() {
        query.push("\nHAVING true");
        for predicate in having {
            push_predicate(&mut query, predicate);
        }
    }

    query.push("\nORDER BY properties.cost_per_night, properties.id");
    query.push("\nLIMIT ");
    query.push_bind(i64::from(limit));
    query
}

fn push_predicate(query: &mut QueryBuilder<'static, Postgres>, predicate: &SearchPredicate) {
    match predicate {
        SearchPredicate::CityContains(city) => {
            query.push("\nAND properties.city LIKE ");
            query.push_bind(like_pattern(city));
        }
        SearchPredicate::OwnerIs(owner_id) => {
            query.push("\nAND properties.owner_id = ");
            query.push_bind(owner_id.value());
        }
        SearchPredicate::MinimumPrice(price) => {
            query.push("\nAND properties.cost_per_night >= ");
            query.push_bind(price.minor_units());
        }
        SearchPredicate::MaximumPrice(price) => {
            query.push("\nAND properties.cost_per_night <= ");
            query.push_bind(price.minor_units());
        }
        SearchPredicate::MinimumRating(rating) => {
            query.push("\nAND avg(property_reviews.rating) >= ");
            query.push_bind(*rating);
        }
    }
}

/// Database row for `properties`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyRow {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: PropertyId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            title: row.title,
            description: row.description,
            thumbnail_photo_url: row.thumbnail_photo_url,
            cover_photo_url: row.cover_photo_url,
            cost_per_night: PricePerNight::from_minor(row.cost_per_night),
            parking_spaces: row.parking_spaces,
            number_of_bathrooms: row.number_of_bathrooms,
            number_of_bedrooms: row.number_of_bedrooms,
            country: row.country,
            street: row.street,
            city: row.city,
            province: row.province,
            post_code: row.post_code,
        }
    }
}

/// A property row with its aggregated review rating
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyListingRow {
    #[sqlx(flatten)]
    pub property: PropertyRow,
    pub average_rating: Decimal,
}

impl From<PropertyListingRow> for PropertyListing {
    fn from(row: PropertyListingRow) -> Self {
        PropertyListing {
            property: row.property.into(),
            average_rating: row.average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn normalized(query: &QueryBuilder<'static, Postgres>) -> String {
        query.sql().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_unfiltered_search_binds_only_limit() {
        let query = build_search_query(&PropertySearch::new(), 10);
        let sql = normalized(&query);
        assert!(sql.contains("WHERE 1 = 1 GROUP BY properties.id ORDER BY"));
        assert!(sql.ends_with("LIMIT $1"));
        assert!(!sql.contains("HAVING"));
    }

    #[test]
    fn test_every_filter_gets_its_own_placeholder() {
        let search = PropertySearch::new()
            .in_city("Vancouver")
            .owned_by(UserId::new(4))
            .price_between_whole_units(100, 200)
            .unwrap()
            .minimum_rating(dec!(4));
        let sql = normalized(&build_search_query(&search, 5));

        assert!(sql.contains("AND properties.city LIKE $1"));
        assert!(sql.contains("AND properties.owner_id = $2"));
        assert!(sql.contains("AND properties.cost_per_night >= $3"));
        assert!(sql.contains("AND properties.cost_per_night <= $4"));
        assert!(sql.contains("HAVING true AND avg(property_reviews.rating) >= $5"));
        assert!(sql.ends_with("LIMIT $6"));
    }

    #[test]
    fn test_rating_filter_follows_grouping() {
        let search = PropertySearch::new().minimum_rating(dec!(4));
        let sql = normalized(&build_search_query(&search, 10));

        let group = sql.find("GROUP BY").unwrap();
        let having = sql.find("HAVING").unwrap();
        let order = sql.find("ORDER BY").unwrap();
        assert!(group < having && having < order);
        assert!(sql.contains("avg(property_reviews.rating) >= $1"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn test_placeholders_renumber_when_options_absent() {
        let search = PropertySearch::new().maximum_price(PricePerNight::from_minor(5_000));
        let sql = normalized(&build_search_query(&search, 10));
        assert!(sql.contains("AND properties.cost_per_night <= $1"));
        assert!(sql.ends_with("LIMIT $2"));
    }
}
