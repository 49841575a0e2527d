//! Federal per diem rate models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily federal per diem rates for a resolved locality.
///
/// Resolving these from a ZIP code or destination is the caller's job; the
/// engine only ever sees the numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateInputs {
    /// Maximum lodging rate per night.
    pub lodging_daily: Decimal,
    /// Meals and incidental expenses (M&IE) per day.
    pub meals_daily: Decimal,
    /// GSA fiscal year the rates belong to.
    pub fiscal_year: i32,
}

/// Weekly and monthly ceilings derived from the daily per diem rates.
///
/// # Example
///
/// ```
/// use stipend_engine::models::GsaTotals;
/// use rust_decimal::Decimal;
///
/// let totals = GsaTotals {
///     fiscal_year: 2026,
///     lodging_daily: Decimal::from(156),
///     meals_daily: Decimal::from(86),
///     weekly_max: Decimal::from(1694),
///     monthly_max: Decimal::from(7260),
/// };
/// assert_eq!(totals.daily_total(), Decimal::from(242));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GsaTotals {
    /// GSA fiscal year the rates belong to.
    pub fiscal_year: i32,
    /// Lodging rate per night.
    pub lodging_daily: Decimal,
    /// M&IE rate per day.
    pub meals_daily: Decimal,
    /// `(lodging + meals) × 7`.
    pub weekly_max: Decimal,
    /// `(lodging + meals) × 30`.
    pub monthly_max: Decimal,
}

impl GsaTotals {
    /// Returns the combined lodging and M&IE rate for one day.
    pub fn daily_total(&self) -> Decimal {
        self.lodging_daily + self.meals_daily
    }
}
