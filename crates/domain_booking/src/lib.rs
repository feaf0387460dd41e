//! Booking Domain
//!
//! This crate holds the records of the LightBnB rental site and the port
//! through which they are read and written:
//!
//! - **User**: guests and owners, looked up by email or id
//! - **Property**: rental listings with nightly price, capacity and address
//! - **Reservation**: a guest's booking of a property from a start date
//! - **PropertyReview**: ratings that feed a property's average rating
//!
//! Persistence lives behind [`BookingPort`]. `infra_db` provides a
//! PostgreSQL adapter and a JSON-fixture adapter; both honour the same
//! contract, so callers pick one by configuration.
//!
//! # Examples
//!
//! ```rust
//! use domain_booking::PropertySearch;
//! use core_kernel::UserId;
//!
//! // Vancouver listings by owner 3 between $100 and $200 a night
//! let search = PropertySearch::new()
//!     .in_city("Vancouver")
//!     .owned_by(UserId::new(3))
//!     .price_between_whole_units(100, 200)
//!     .unwrap();
//!
//! assert_eq!(search.predicates().len(), 4);
//! ```

pub mod user;
pub mod property;
pub mod reservation;
pub mod search;
pub mod error;
pub mod validation;
pub mod ports;

pub use user::{User, NewUser};
pub use property::{Property, NewProperty, PropertyListing, PropertyReview, average_rating, AVERAGE_RATING_SCALE};
pub use reservation::{Reservation, ReservationDetails};
pub use search::{PropertySearch, SearchPredicate, PredicateStage, DEFAULT_LIMIT, like_pattern};
pub use error::BookingError;
pub use validation::BookingValidator;
pub use ports::{BookingPort, BookingPortExt, effective_limit};
