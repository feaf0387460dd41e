//! Tests for booking records, validation and search predicates

use core_kernel::{PortError, PricePerNight, PropertyId, UserId};
use rust_decimal_macros::dec;

use domain_booking::{
    BookingError, BookingValidator, NewProperty, NewUser, Property, PropertyListing,
    PropertySearch, SearchPredicate,
};

fn new_property() -> NewProperty {
    NewProperty {
        title: "Speed lamp".to_string(),
        description: "description".to_string(),
        owner_id: UserId::new(1),
        cover_photo_url: "https://images.example.com/cover.jpeg".to_string(),
        thumbnail_photo_url: "https://images.example.com/thumb.jpeg".to_string(),
        cost_per_night: PricePerNight::from_minor(93_061),
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
        province: "Quebec".to_string(),
        city: "Namsub".to_string(),
        country: "Canada".to_string(),
        street: "536 Namsub Highway".to_string(),
        post_code: "28142".to_string(),
    }
}

fn listing(city: &str, owner: i32, cents: i32, rating: rust_decimal::Decimal) -> PropertyListing {
    let mut property = new_property();
    property.city = city.to_string();
    property.owner_id = UserId::new(owner);
    property.cost_per_night = PricePerNight::from_minor(cents);
    PropertyListing {
        property: property.into_property(PropertyId::new(1)),
        average_rating: rating,
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_property_is_valid() {
        assert!(BookingValidator::validate_property(&new_property()).is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut property = new_property();
        property.cost_per_night = PricePerNight::from_minor(-1);
        assert_eq!(
            BookingValidator::validate_property(&property),
            Err(BookingError::invalid_field(
                "cost_per_night",
                "cost_per_night must not be negative"
            ))
        );
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let mut property = new_property();
        property.number_of_bedrooms = -2;
        let err = BookingValidator::validate_property(&property).unwrap_err();
        assert!(matches!(err, BookingError::InvalidField { ref field, .. } if field == "number_of_bedrooms"));
    }

    #[test]
    fn test_bad_photo_url_rejected() {
        let mut property = new_property();
        property.thumbnail_photo_url = "not a url".to_string();
        assert!(BookingValidator::validate_property(&property).is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        let user = NewUser::new("Ada", "ada@example.com", "");
        let err = BookingValidator::validate_user(&user).unwrap_err();
        let port_error: PortError = err.into();
        match port_error {
            PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_property_keeps_fields() {
        let property: Property = new_property().into_property(PropertyId::new(77));
        assert_eq!(property.id, PropertyId::new(77));
        assert_eq!(property.title, "Speed lamp");
        assert_eq!(property.post_code, "28142");
        assert_eq!(property.cost_per_night.minor_units(), 93_061);
    }
}

// ============================================================================
// Search predicates
// ============================================================================

mod search_tests {
    use super::*;

    #[test]
    fn test_city_is_substring_match() {
        let l = listing("North Vancouver", 1, 10_000, dec!(4));
        assert!(SearchPredicate::CityContains("Vancouver".to_string()).matches(&l));
        assert!(!SearchPredicate::CityContains("vancouver".to_string()).matches(&l));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let search = PropertySearch::new().price_between_whole_units(100, 200).unwrap();
        assert!(search.matches(&listing("A", 1, 10_000, dec!(3))));
        assert!(search.matches(&listing("A", 1, 20_000, dec!(3))));
        assert!(!search.matches(&listing("A", 1, 9_999, dec!(3))));
        assert!(!search.matches(&listing("A", 1, 20_001, dec!(3))));
    }

    #[test]
    fn test_rating_threshold_inclusive() {
        let search = PropertySearch::new().minimum_rating(dec!(4));
        assert!(search.matches(&listing("A", 1, 10_000, dec!(4))));
        assert!(!search.matches(&listing("A", 1, 10_000, dec!(3.99))));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let search = PropertySearch::new().in_city("Van").owned_by(UserId::new(2));
        assert!(search.matches(&listing("Vancouver", 2, 1, dec!(1))));
        assert!(!search.matches(&listing("Vancouver", 3, 1, dec!(1))));
        assert!(!search.matches(&listing("Toronto", 2, 1, dec!(1))));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert!(PropertySearch::new().matches(&listing("Anywhere", 9, 0, dec!(1))));
    }
}
