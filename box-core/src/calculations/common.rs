//! Common utility functions for costing calculations.
//!
//! This module provides shared functionality used across the cost engine
//! and document calculations, including rounding and percentage helpers.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use box_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(36.344)), dec!(36.34));
/// assert_eq!(round_half_up(dec!(36.345)), dec!(36.35));
/// assert_eq!(round_half_up(dec!(36.346)), dec!(36.35));
/// assert_eq!(round_half_up(dec!(-36.345)), dec!(-36.35)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Takes a percentage of a base amount and rounds it to two decimal places.
///
/// # Arguments
///
/// * `base` - The amount the percentage applies to
/// * `percent` - The percentage expressed as a plain number, e.g. `18` for 18%
///
/// # Returns
///
/// `base * percent / 100`, rounded half-up to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use box_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(5380.55), dec!(18)), dec!(968.50));
/// assert_eq!(percent_of(dec!(100000), dec!(2)), dec!(2000.00));
/// assert_eq!(percent_of(dec!(250.00), dec!(0)), dec!(0.00));
/// ```
pub fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    round_half_up(base * percent / Decimal::ONE_HUNDRED)
}
