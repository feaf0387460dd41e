//! Custom Test Assertions
//!
//! Assertion helpers for query results that print the offending ids rather
//! than whole records.

use domain_booking::{NewProperty, Property, PropertyListing, ReservationDetails};

/// Asserts listings are ordered by nightly price, then id
pub fn assert_sorted_by_price(listings: &[PropertyListing]) {
    for pair in listings.windows(2) {
        let (a, b) = (&pair[0].property, &pair[1].property);
        assert!(
            (a.cost_per_night, a.id) <= (b.cost_per_night, b.id),
            "Listings out of order: {} ({}) before {} ({})",
            a.id,
            a.cost_per_night,
            b.id,
            b.cost_per_night
        );
    }
}

/// Asserts reservations are ordered by start date, then id
pub fn assert_reservations_ascending(reservations: &[ReservationDetails]) {
    for pair in reservations.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.start_date, a.id) <= (b.start_date, b.id),
            "Reservations out of order: {} on {} before {} on {}",
            a.id,
            a.start_date,
            b.id,
            b.start_date
        );
    }
}

/// Asserts a stored property carries every field of the payload it was created from
pub fn assert_property_matches_new(stored: &Property, new: &NewProperty) {
    let expected = new.clone().into_property(stored.id);
    assert_eq!(stored, &expected, "Stored property {} differs from payload", stored.id);
}

/// Asserts the listed property ids, in order
pub fn assert_listing_ids(listings: &[PropertyListing], expected: &[i32]) {
    let actual: Vec<i32> = listings.iter().map(|l| l.property.id.value()).collect();
    assert_eq!(actual, expected, "Unexpected property ids");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::NewPropertyBuilder;
    use crate::fixtures::PropertyFixtures;
    use core_kernel::PropertyId;
    use rust_decimal_macros::dec;

    fn listings(order: &[usize]) -> Vec<PropertyListing> {
        let all = PropertyFixtures::all();
        order
            .iter()
            .map(|&i| PropertyListing {
                property: all[i].clone(),
                average_rating: dec!(4),
            })
            .collect()
    }

    #[test]
    fn test_sorted_by_price_accepts_ascending() {
        // 9300, 10000, 15000
        assert_sorted_by_price(&listings(&[0, 1, 2]));
    }

    #[test]
    #[should_panic(expected = "Listings out of order")]
    fn test_sorted_by_price_rejects_descending() {
        assert_sorted_by_price(&listings(&[2, 0]));
    }

    #[test]
    fn test_property_matches_new() {
        let new = NewPropertyBuilder::new().build();
        let stored = new.clone().into_property(PropertyId::new(8));
        assert_property_matches_new(&stored, &new);
    }
}
