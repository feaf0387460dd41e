//! Pre-built Test Fixtures
//!
//! A small LightBnB data set whose query results are known by hand. The
//! numbers are chosen to sit on the edges the queries care about:
//!
//! | property | owner | city | cents | ratings | average |
//! | --- | --- | --- | --- | --- | --- |
//! | 1 Speed lamp | 1 | Vancouver | 9 300 | 5, 4 | 4.5 |
//! | 2 Blank corner | 1 | Calgary | 10 000 | 4 | 4 |
//! | 3 Habit mix | 2 | North Vancouver | 15 000 | 3, 4, 4 | 3.67 |
//! | 4 Headed know | 2 | Toronto | 20 000 | 5 | 5 |
//! | 5 Port out | 3 | Vancouver | 25 000 | 2, 3 | 2.5 |
//! | 6 Unreviewed cabin | 3 | Vancouver | 12 000 | none | - |
//! | 7 Fun glad | 4 | Montreal | 18 000 | 4, 5, 5 | 4.67 |
//!
//! Guest 1 holds four reservations (one on the unreviewed cabin), guest 2
//! and guest 3 one each, guest 4 none.

use chrono::NaiveDate;
use core_kernel::{PricePerNight, PropertyId, ReservationId, UserId};
use domain_booking::{Property, PropertyReview, Reservation, User};
use infra_db::FixtureSet;

/// Hash of the word "password", as stored by the original seeds
pub const SEED_PASSWORD: &str = "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.";

/// Fixture for user rows
pub struct UserFixtures;

impl UserFixtures {
    pub fn devin() -> User {
        user(1, "Devin Sanders", "tristanjacobs@gmail.com")
    }

    pub fn iva() -> User {
        user(2, "Iva Harrison", "allisonjackson@mail.com")
    }

    pub fn lloyd() -> User {
        user(3, "Lloyd Jefferson", "asherpoole@gmx.com")
    }

    pub fn dale() -> User {
        user(4, "Dale Coleman", "michaelgray@mail.com")
    }

    pub fn all() -> Vec<User> {
        vec![Self::devin(), Self::iva(), Self::lloyd(), Self::dale()]
    }
}

fn user(id: i32, name: &str, email: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        password: SEED_PASSWORD.to_string(),
    }
}

/// Fixture for property rows
pub struct PropertyFixtures;

impl PropertyFixtures {
    pub fn all() -> Vec<Property> {
        vec![
            property(1, 1, "Speed lamp", "Vancouver", 9_300),
            property(2, 1, "Blank corner", "Calgary", 10_000),
            property(3, 2, "Habit mix", "North Vancouver", 15_000),
            property(4, 2, "Headed know", "Toronto", 20_000),
            property(5, 3, "Port out", "Vancouver", 25_000),
            property(6, 3, "Unreviewed cabin", "Vancouver", 12_000),
            property(7, 4, "Fun glad", "Montreal", 18_000),
        ]
    }

    /// Id of the only property without reviews
    pub fn unreviewed_id() -> PropertyId {
        PropertyId::new(6)
    }
}

fn property(id: i32, owner: i32, title: &str, city: &str, cents: i32) -> Property {
    Property {
        id: PropertyId::new(id),
        owner_id: UserId::new(owner),
        title: title.to_string(),
        description: "description".to_string(),
        thumbnail_photo_url: format!("https://images.example.com/{}/small.jpeg", id),
        cover_photo_url: format!("https://images.example.com/{}/large.jpeg", id),
        cost_per_night: PricePerNight::from_minor(cents),
        parking_spaces: id % 3,
        number_of_bathrooms: 1 + id % 2,
        number_of_bedrooms: 1 + id % 4,
        country: "Canada".to_string(),
        street: format!("{} Main Street", 100 + id),
        city: city.to_string(),
        province: "BC".to_string(),
        post_code: format!("V{}K 0A1", id),
    }
}

/// Fixture for review rows
pub struct ReviewFixtures;

impl ReviewFixtures {
    pub fn all() -> Vec<PropertyReview> {
        [
            (1, 2, 5),
            (1, 3, 4),
            (2, 2, 4),
            (3, 1, 3),
            (3, 3, 4),
            (3, 4, 4),
            (4, 1, 5),
            (5, 2, 2),
            (5, 4, 3),
            (7, 1, 4),
            (7, 2, 5),
            (7, 3, 5),
        ]
        .into_iter()
        .map(|(property_id, guest_id, rating)| PropertyReview {
            property_id: PropertyId::new(property_id),
            guest_id: UserId::new(guest_id),
            rating,
        })
        .collect()
    }
}

/// Fixture for reservation rows
pub struct ReservationFixtures;

impl ReservationFixtures {
    pub fn all() -> Vec<Reservation> {
        vec![
            reservation(1, 3, 1, (2023, 6, 1)),
            reservation(2, 1, 1, (2021, 3, 15)),
            reservation(3, 6, 1, (2022, 12, 24)),
            reservation(4, 1, 2, (2020, 1, 1)),
            reservation(5, 7, 1, (2019, 9, 11)),
            reservation(6, 2, 3, (2024, 2, 2)),
        ]
    }

    /// Guest 1's reservation ids, earliest start date first
    pub fn devin_in_start_order() -> Vec<ReservationId> {
        [5, 2, 3, 1].into_iter().map(ReservationId::new).collect()
    }
}

fn reservation(id: i32, property_id: i32, guest_id: i32, (y, m, d): (i32, u32, u32)) -> Reservation {
    Reservation {
        id: ReservationId::new(id),
        property_id: PropertyId::new(property_id),
        guest_id: UserId::new(guest_id),
        start_date: NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date"),
    }
}

/// The complete seed data set
pub fn seed_fixtures() -> FixtureSet {
    FixtureSet {
        users: UserFixtures::all(),
        properties: PropertyFixtures::all(),
        reservations: ReservationFixtures::all(),
        reviews: ReviewFixtures::all(),
    }
}

/// Seed data plus enough extra rows to overflow the default page size
///
/// Adds eight reviewed Edmonton properties (ids 8 to 15, priced above every
/// seeded one) and nine more reservations for guest 1 (ids 7 to 15, starting
/// in 2025), giving 14 listings and 13 reservations for guest 1.
pub fn crowded_fixtures() -> FixtureSet {
    let mut set = seed_fixtures();
    for id in 8..=15 {
        set.properties.push(property(id, 4, &format!("Crowded {}", id), "Edmonton", 30_000 + id * 100));
        set.reviews.push(PropertyReview {
            property_id: PropertyId::new(id),
            guest_id: UserId::new(2),
            rating: 3,
        });
    }
    for id in 7..=15 {
        set.reservations.push(reservation(id, id, 1, (2025, 1, id as u32)));
    }
    set
}

/// Seed data encoded as fixture JSON files, keyed by file name
pub fn seed_fixture_files() -> Vec<(&'static str, String)> {
    let set = seed_fixtures();
    // Users are written out with passwords, which `User` never serializes.
    let users: Vec<serde_json::Value> = set
        .users
        .iter()
        .map(|u| {
            serde_json::json!({
                "id": u.id,
                "name": u.name,
                "email": u.email,
                "password": u.password,
            })
        })
        .collect();

    vec![
        (infra_db::fixtures::USERS_FILE, serde_json::to_string_pretty(&users).unwrap()),
        (infra_db::fixtures::PROPERTIES_FILE, serde_json::to_string_pretty(&set.properties).unwrap()),
        (infra_db::fixtures::RESERVATIONS_FILE, serde_json::to_string_pretty(&set.reservations).unwrap()),
        (infra_db::fixtures::REVIEWS_FILE, serde_json::to_string_pretty(&set.reviews).unwrap()),
    ]
}
