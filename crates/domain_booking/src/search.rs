//! Property search options
//!
//! A [`PropertySearch`] is a set of optional filters combined with AND. It is
//! lowered to an ordered list of [`SearchPredicate`]s; the SQL adapter turns
//! each into a clause with a positional bind, the fixture adapter evaluates
//! them directly with [`SearchPredicate::matches`]. The order is fixed so the
//! placeholder numbering of the generated statement is stable:
//!
//! 1. city (pattern match)
//! 2. owner (exact)
//! 3. minimum nightly price
//! 4. maximum nightly price
//! 5. minimum average rating, applied after aggregation

use core_kernel::{MoneyError, PricePerNight, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::property::PropertyListing;

/// Row cap applied when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 10;

/// Optional filters for listing properties
///
/// Prices are in minor units, matching `properties.cost_per_night`. Use
/// [`PropertySearch::price_between_whole_units`] to filter by whole
/// currency amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySearch {
    pub city: Option<String>,
    pub owner_id: Option<UserId>,
    pub minimum_price_per_night: Option<PricePerNight>,
    pub maximum_price_per_night: Option<PricePerNight>,
    pub minimum_rating: Option<Decimal>,
}

impl PropertySearch {
    /// Creates a search with no filters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owned_by(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_price(mut self, price: PricePerNight) -> Self {
        self.minimum_price_per_night = Some(price);
        self
    }

    pub fn maximum_price(mut self, price: PricePerNight) -> Self {
        self.maximum_price_per_night = Some(price);
        self
    }

    /// Sets both price bounds from whole currency units (dollars)
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` when a bound does not fit once scaled
    /// to minor units.
    pub fn price_between_whole_units(self, minimum: i32, maximum: i32) -> Result<Self, MoneyError> {
        Ok(self
            .minimum_price(PricePerNight::from_whole_units(minimum)?)
            .maximum_price(PricePerNight::from_whole_units(maximum)?))
    }

    pub fn minimum_rating(mut self, rating: Decimal) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// Lowers the options to predicates, in bind order
    ///
    /// A blank city imposes no constraint.
    pub fn predicates(&self) -> Vec<SearchPredicate> {
        let mut predicates = Vec::with_capacity(5);

        if let Some(city) = self.city.as_deref().filter(|c| !c.trim().is_empty()) {
            predicates.push(SearchPredicate::CityContains(city.to_string()));
        }
        if let Some(owner_id) = self.owner_id {
            predicates.push(SearchPredicate::OwnerIs(owner_id));
        }
        if let Some(price) = self.minimum_price_per_night {
            predicates.push(SearchPredicate::MinimumPrice(price));
        }
        if let Some(price) = self.maximum_price_per_night {
            predicates.push(SearchPredicate::MaximumPrice(price));
        }
        if let Some(rating) = self.minimum_rating {
            predicates.push(SearchPredicate::MinimumRating(rating));
        }

        predicates
    }

    /// Returns true when no option constrains the result
    pub fn is_unfiltered(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Returns true if a listing satisfies every predicate
    pub fn matches(&self, listing: &PropertyListing) -> bool {
        self.predicates().iter().all(|p| p.matches(listing))
    }
}

/// Where a predicate is evaluated relative to the per-property grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateStage {
    /// Filters individual rows (`WHERE`)
    Row,
    /// Filters grouped properties (`HAVING`)
    Aggregate,
}

/// A single search constraint
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPredicate {
    CityContains(String),
    OwnerIs(UserId),
    MinimumPrice(PricePerNight),
    MaximumPrice(PricePerNight),
    MinimumRating(Decimal),
}

impl SearchPredicate {
    pub fn stage(&self) -> PredicateStage {
        match self {
            SearchPredicate::MinimumRating(_) => PredicateStage::Aggregate,
            _ => PredicateStage::Row,
        }
    }

    /// Evaluates the predicate against a listing
    ///
    /// Price bounds and the rating threshold are inclusive.
    pub fn matches(&self, listing: &PropertyListing) -> bool {
        let property = &listing.property;
        match self {
            SearchPredicate::CityContains(city) => property.city.contains(city.as_str()),
            SearchPredicate::OwnerIs(owner_id) => property.owner_id == *owner_id,
            SearchPredicate::MinimumPrice(price) => property.cost_per_night >= *price,
            SearchPredicate::MaximumPrice(price) => property.cost_per_night <= *price,
            SearchPredicate::MinimumRating(rating) => listing.average_rating >= *rating,
        }
    }
}

/// Builds a `LIKE` pattern matching `fragment` anywhere in the value
///
/// `%`, `_` and the escape character are escaped so the fragment is
/// matched literally.
pub fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_search_has_no_predicates() {
        assert!(PropertySearch::new().is_unfiltered());
    }

    #[test]
    fn test_blank_city_is_ignored() {
        let search = PropertySearch::new().in_city("  ");
        assert!(search.is_unfiltered());
    }

    #[test]
    fn test_predicate_order_is_fixed() {
        let search = PropertySearch::new()
            .minimum_rating(dec!(4))
            .maximum_price(PricePerNight::from_minor(20_000))
            .owned_by(UserId::new(5))
            .in_city("Vancouver")
            .minimum_price(PricePerNight::from_minor(10_000));

        let predicates = search.predicates();
        assert_eq!(
            predicates,
            vec![
                SearchPredicate::CityContains("Vancouver".to_string()),
                SearchPredicate::OwnerIs(UserId::new(5)),
                SearchPredicate::MinimumPrice(PricePerNight::from_minor(10_000)),
                SearchPredicate::MaximumPrice(PricePerNight::from_minor(20_000)),
                SearchPredicate::MinimumRating(dec!(4)),
            ]
        );
        let stages: Vec<_> = predicates.iter().map(|p| p.stage()).collect();
        assert_eq!(stages.last(), Some(&PredicateStage::Aggregate));
        assert!(stages[..4].iter().all(|s| *s == PredicateStage::Row));
    }

    #[test]
    fn test_whole_unit_prices_scaled() {
        let search = PropertySearch::new().price_between_whole_units(100, 200).unwrap();
        assert_eq!(search.minimum_price_per_night, Some(PricePerNight::from_minor(10_000)));
        assert_eq!(search.maximum_price_per_night, Some(PricePerNight::from_minor(20_000)));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Van"), "%Van%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
