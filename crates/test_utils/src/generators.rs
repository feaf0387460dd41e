//! Property-Based Test Generators
//!
//! Proptest strategies for search options and insert payloads. Cities and
//! owners are drawn from the seed data so generated searches hit real rows
//! as well as empty results.

use core_kernel::{PricePerNight, UserId};
use domain_booking::{NewProperty, PropertySearch};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::NewPropertyBuilder;

/// Strategy for nightly prices between 0 and 500.00
pub fn price_strategy() -> impl Strategy<Value = PricePerNight> {
    (0i32..=50_000).prop_map(PricePerNight::from_minor)
}

/// Strategy for rating thresholds from 1.0 to 5.0 in tenths
pub fn rating_threshold_strategy() -> impl Strategy<Value = Decimal> {
    (10i64..=50).prop_map(|n| Decimal::new(n, 1))
}

/// Strategy for city fragments, including ones matching several seeded cities
pub fn city_fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Vancouver".to_string()),
        Just("couver".to_string()),
        Just("Calgary".to_string()),
        Just("Montreal".to_string()),
        Just("Atlantis".to_string()),
        "[A-Za-z]{1,6}",
    ]
}

/// Strategy for owner ids, seeded (1-4) or unknown
pub fn owner_strategy() -> impl Strategy<Value = UserId> {
    (1i32..=6).prop_map(UserId::new)
}

/// Strategy for any combination of search options
pub fn property_search_strategy() -> impl Strategy<Value = PropertySearch> {
    (
        proptest::option::of(city_fragment_strategy()),
        proptest::option::of(owner_strategy()),
        proptest::option::of(price_strategy()),
        proptest::option::of(price_strategy()),
        proptest::option::of(rating_threshold_strategy()),
    )
        .prop_map(|(city, owner_id, min, max, rating)| PropertySearch {
            city,
            owner_id,
            minimum_price_per_night: min,
            maximum_price_per_night: max,
            minimum_rating: rating,
        })
}

/// Strategy for row limits, including zero and limits beyond the data set
pub fn limit_strategy() -> impl Strategy<Value = Option<u32>> {
    proptest::option::of(0u32..20)
}

/// Strategy for valid property payloads owned by a seeded user
pub fn new_property_strategy() -> impl Strategy<Value = NewProperty> {
    (
        "[A-Z][a-z]{2,12}( [a-z]{2,8})?",
        1i32..=4,
        0i32..=50_000,
        0i32..=6,
    )
        .prop_map(|(title, owner, cents, bedrooms)| {
            NewPropertyBuilder::new()
                .with_title(title)
                .with_owner(UserId::new(owner))
                .with_cost_per_night(cents)
                .with_bedrooms(bedrooms)
                .build()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_booking::BookingValidator;

    proptest! {
        #[test]
        fn generated_properties_are_valid(property in new_property_strategy()) {
            prop_assert!(BookingValidator::validate_property(&property).is_ok());
        }

        #[test]
        fn rating_thresholds_in_range(rating in rating_threshold_strategy()) {
            prop_assert!(rating >= Decimal::ONE);
            prop_assert!(rating <= Decimal::from(5));
        }
    }
}
