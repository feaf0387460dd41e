//! Nightly prices in minor currency units
//!
//! `properties.cost_per_night` is an `INTEGER` column holding cents. Callers
//! think in whole currency units, so conversion goes through this type and
//! never through floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of minor units in one whole currency unit
pub const MINOR_UNITS_PER_UNIT: i32 = 100;

/// Errors that can occur when constructing prices
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// Price of one night, stored as an integer count of minor units (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricePerNight(i32);

impl PricePerNight {
    /// Creates a price from minor units, as stored in the database
    pub const fn from_minor(minor_units: i32) -> Self {
        Self(minor_units)
    }

    /// Creates a price from whole currency units (e.g. dollars)
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` when the amount does not fit in the
    /// column once scaled to minor units.
    pub fn from_whole_units(units: i32) -> Result<Self, MoneyError> {
        units
            .checked_mul(MINOR_UNITS_PER_UNIT)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Creates a price from a decimal amount in whole units
    ///
    /// Fractions beyond the minor unit are rejected rather than rounded.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        let scaled = amount
            .checked_mul(Decimal::from(MINOR_UNITS_PER_UNIT))
            .ok_or(MoneyError::Overflow)?;
        if scaled.fract() != Decimal::ZERO {
            return Err(MoneyError::InvalidAmount(format!(
                "{} has more precision than the minor unit",
                amount
            )));
        }
        scaled.to_i32().map(Self).ok_or(MoneyError::Overflow)
    }

    /// Returns the amount in minor units
    pub const fn minor_units(&self) -> i32 {
        self.0
    }

    /// Returns the amount in whole units as a decimal
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Returns true if the price is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for PricePerNight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_decimal())
    }
}

impl From<PricePerNight> for i32 {
    fn from(price: PricePerNight) -> i32 {
        price.0
    }
}
