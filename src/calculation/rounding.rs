//! Rounding helpers shared by every derivation.
//!
//! All figures round half away from zero. Cent-level values use
//! [`round_cents`], whole-currency and whole-percent values use
//! [`round_whole`]; no derivation rounds any other way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half away from zero.
///
/// ```
/// use stipend_engine::calculation::round_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_cents(Decimal::from_str("22.3888").unwrap()), Decimal::from_str("22.39").unwrap());
/// assert_eq!(round_cents(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to a whole unit, half away from zero.
///
/// ```
/// use stipend_engine::calculation::round_whole;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_whole(Decimal::from_str("1185.8").unwrap()), Decimal::from(1186));
/// assert_eq!(round_whole(Decimal::from_str("84.5").unwrap()), Decimal::from(85));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
