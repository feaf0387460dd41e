//! Repository implementations for booking tables
//!
//! Each repository owns the SQL for one table (and the joins rooted at it)
//! and maps result rows to plain `*Row` structs. Statements are issued one
//! at a time with positional parameters; no transactions span calls.

pub mod user;
pub mod reservation;
pub mod property;

pub use user::{UserRepository, UserRow};
pub use reservation::{ReservationRepository, ReservationDetailsRow};
pub use property::{PropertyRepository, PropertyRow, PropertyListingRow};
