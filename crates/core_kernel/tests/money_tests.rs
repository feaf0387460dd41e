//! Unit tests for nightly price conversion
//!
//! Search filters arrive in whole currency units while the column stores
//! cents; these tests pin the conversion at the edges.

use core_kernel::{PricePerNight, MoneyError};
use core_kernel::money::MINOR_UNITS_PER_UNIT;
use rust_decimal_macros::dec;

mod conversion {
    use super::*;

    #[test]
    fn test_whole_units_become_cents() {
        assert_eq!(PricePerNight::from_whole_units(100).unwrap().minor_units(), 10_000);
        assert_eq!(PricePerNight::from_whole_units(200).unwrap().minor_units(), 20_000);
    }

    #[test]
    fn test_zero_price() {
        let free = PricePerNight::from_whole_units(0).unwrap();
        assert_eq!(free, PricePerNight::default());
        assert!(!free.is_negative());
    }

    #[test]
    fn test_largest_representable_whole_amount() {
        let max_units = i32::MAX / MINOR_UNITS_PER_UNIT;
        assert!(PricePerNight::from_whole_units(max_units).is_ok());
        assert_eq!(
            PricePerNight::from_whole_units(max_units + 1),
            Err(MoneyError::Overflow)
        );
    }

    #[test]
    fn test_decimal_overflow() {
        assert_eq!(
            PricePerNight::from_decimal(dec!(100000000000)),
            Err(MoneyError::Overflow)
        );
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_prices_order_by_minor_units() {
        let mut prices = vec![
            PricePerNight::from_minor(30_000),
            PricePerNight::from_minor(9_999),
            PricePerNight::from_minor(10_000),
        ];
        prices.sort();
        let cents: Vec<i32> = prices.iter().map(|p| p.minor_units()).collect();
        assert_eq!(cents, vec![9_999, 10_000, 30_000]);
    }
}
