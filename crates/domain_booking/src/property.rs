//! Rental properties and their reviews

use core_kernel::{PricePerNight, PropertyId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A rental property as stored in `properties`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in minor units (cents)
    pub cost_per_night: PricePerNight,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// The fourteen fields supplied when listing a new property
///
/// Column order for the insert is fixed: title, description, owner,
/// photos, price, capacity, then address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewProperty {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: UserId,
    #[validate(url(message = "cover_photo_url must be a URL"))]
    pub cover_photo_url: String,
    #[validate(url(message = "thumbnail_photo_url must be a URL"))]
    pub thumbnail_photo_url: String,
    #[validate(custom(function = "non_negative_price"))]
    pub cost_per_night: PricePerNight,
    #[validate(range(min = 0, message = "parking_spaces must not be negative"))]
    pub parking_spaces: i32,
    #[validate(range(min = 0, message = "number_of_bathrooms must not be negative"))]
    pub number_of_bathrooms: i32,
    #[validate(range(min = 0, message = "number_of_bedrooms must not be negative"))]
    pub number_of_bedrooms: i32,
    #[validate(length(min = 1, message = "province must not be empty"))]
    pub province: String,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: String,
    #[validate(length(min = 1, message = "street must not be empty"))]
    pub street: String,
    #[validate(length(min = 1, message = "post_code must not be empty"))]
    pub post_code: String,
}

fn non_negative_price(price: &PricePerNight) -> Result<(), ValidationError> {
    if price.is_negative() {
        let mut error = ValidationError::new("range");
        error.message = Some("cost_per_night must not be negative".into());
        return Err(error);
    }
    Ok(())
}

impl NewProperty {
    /// Attaches the identifier assigned by storage
    pub fn into_property(self, id: PropertyId) -> Property {
        Property {
            id,
            owner_id: self.owner_id,
            title: self.title,
            description: self.description,
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night: self.cost_per_night,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
            country: self.country,
            street: self.street,
            city: self.city,
            province: self.province,
            post_code: self.post_code,
        }
    }
}

/// A property together with the mean of its review ratings
///
/// Only properties with at least one review produce a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Decimal,
}

/// A guest's rating of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReview {
    pub property_id: PropertyId,
    pub guest_id: UserId,
    pub rating: i16,
}

/// Fractional digits PostgreSQL's `avg()` keeps for an integer column
pub const AVERAGE_RATING_SCALE: u32 = 16;

/// Arithmetic mean of a set of ratings, `None` when there are none
///
/// Rounded to [`AVERAGE_RATING_SCALE`] so in-memory averages equal the ones
/// the database computes.
pub fn average_rating<I>(ratings: I) -> Option<Decimal>
where
    I: IntoIterator<Item = i16>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r), count + 1));
    if count == 0 {
        return None;
    }
    Some((Decimal::from(sum) / Decimal::from(count)).round_dp(AVERAGE_RATING_SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_average_rating_empty() {
        assert_eq!(average_rating(Vec::new()), None);
    }

    #[test]
    fn test_average_rating_exact() {
        assert_eq!(average_rating([4, 4, 4]), Some(dec!(4)));
        assert_eq!(average_rating([3, 4]), Some(dec!(3.5)));
    }

    #[test]
    fn test_average_rating_matches_database_scale() {
        assert_eq!(average_rating([3, 4, 4]), Some(dec!(3.6666666666666667)));
        assert_eq!(average_rating([4, 5, 5]), Some(dec!(4.6666666666666667)));
        assert_eq!(average_rating([1, 1, 2]).unwrap().scale(), AVERAGE_RATING_SCALE);
    }

    #[test]
    fn test_average_rating_repeating_fraction_below_threshold() {
        let avg = average_rating([4, 4, 3]).unwrap();
        assert!(avg < dec!(4));
        assert!(avg > dec!(3.66));
    }

    #[test]
    fn test_listing_serializes_flat() {
        let property = Property {
            id: PropertyId::new(1),
            owner_id: UserId::new(2),
            title: "Loft".to_string(),
            description: String::new(),
            thumbnail_photo_url: "https://img.example.com/t.jpg".to_string(),
            cover_photo_url: "https://img.example.com/c.jpg".to_string(),
            cost_per_night: PricePerNight::from_minor(12_000),
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 2,
            country: "Canada".to_string(),
            street: "1 Main St".to_string(),
            city: "Vancouver".to_string(),
            province: "BC".to_string(),
            post_code: "V5K 0A1".to_string(),
        };
        let listing = PropertyListing { property, average_rating: dec!(4.5) };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["title"], "Loft");
        assert_eq!(json["cost_per_night"], 12_000);
        assert!(json.get("property").is_none());
    }
}
