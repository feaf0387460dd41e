//! Core Kernel - Foundational types for the LightBnB data layer
//!
//! This crate provides the building blocks shared by the booking domain and
//! its persistence adapters:
//! - Integer-backed identifiers for users, properties and reservations
//! - Nightly prices held in minor currency units
//! - The port error type and health-check abstractions used by adapters

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{PricePerNight, MoneyError};
pub use identifiers::{UserId, PropertyId, ReservationId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
