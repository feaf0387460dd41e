//! Test Data Builders
//!
//! Builders for the insert payloads with valid defaults, so a test only
//! spells out the fields it is about.

use core_kernel::{PricePerNight, UserId};
use domain_booking::{NewProperty, NewUser};

/// Builder for registration payloads
pub struct NewUserBuilder {
    name: String,
    email: String,
    password: String,
}

impl Default for NewUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewUserBuilder {
    /// Creates a builder for a user not present in the seed data
    pub fn new() -> Self {
        Self {
            name: "Elliot Page".to_string(),
            email: "elliot.page@example.com".to_string(),
            password: crate::fixtures::SEED_PASSWORD.to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn build(self) -> NewUser {
        NewUser::new(self.name, self.email, self.password)
    }
}

/// Builder for property listing payloads
pub struct NewPropertyBuilder {
    property: NewProperty,
}

impl Default for NewPropertyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPropertyBuilder {
    /// Creates a builder for a Vancouver listing owned by user 1
    pub fn new() -> Self {
        Self {
            property: NewProperty {
                title: "Harbour view suite".to_string(),
                description: "Two blocks from the seawall".to_string(),
                owner_id: UserId::new(1),
                cover_photo_url: "https://images.example.com/new/large.jpeg".to_string(),
                thumbnail_photo_url: "https://images.example.com/new/small.jpeg".to_string(),
                cost_per_night: PricePerNight::from_minor(14_500),
                parking_spaces: 1,
                number_of_bathrooms: 1,
                number_of_bedrooms: 2,
                province: "BC".to_string(),
                city: "Vancouver".to_string(),
                country: "Canada".to_string(),
                street: "1055 Canada Place".to_string(),
                post_code: "V6C 0C3".to_string(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.property.title = title.into();
        self
    }

    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.property.owner_id = owner_id;
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.property.city = city.into();
        self
    }

    /// Sets the nightly price in cents
    pub fn with_cost_per_night(mut self, cents: i32) -> Self {
        self.property.cost_per_night = PricePerNight::from_minor(cents);
        self
    }

    pub fn with_cover_photo_url(mut self, url: impl Into<String>) -> Self {
        self.property.cover_photo_url = url.into();
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: i32) -> Self {
        self.property.number_of_bedrooms = bedrooms;
        self
    }

    pub fn build(self) -> NewProperty {
        self.property
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_booking::BookingValidator;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BookingValidator::validate_user(&NewUserBuilder::new().build()).is_ok());
        assert!(BookingValidator::validate_property(&NewPropertyBuilder::new().build()).is_ok());
    }

    #[test]
    fn test_default_email_not_seeded() {
        let email = NewUserBuilder::new().build().email;
        assert!(crate::fixtures::UserFixtures::all().iter().all(|u| u.email != email));
    }
}
