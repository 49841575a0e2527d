//! Weekly pay breakdown models shared by both offer shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bundled weekly offer, as quoted by healthcare staffing agencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundledOffer {
    /// The single weekly figure to split into stipend and taxable wage.
    pub weekly_gross: Decimal,
    /// Contracted hours per week.
    pub hours: Decimal,
}

/// The split of a weekly offer into tax-free stipend and taxable wage.
///
/// Both the bundled and the hourly construction offer normalise into this
/// shape before housing, negotiation and contract figures are derived.
///
/// # Example
///
/// ```
/// use stipend_engine::models::PayBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = PayBreakdown {
///     weekly_gross: Decimal::from(2500),
///     hours: Decimal::from(36),
///     stipend_weekly: Decimal::from(1694),
///     taxable_weekly: Decimal::from(806),
///     taxable_hourly: Decimal::from_str("22.39").unwrap(),
///     tax_estimate_weekly: Decimal::from_str("161.20").unwrap(),
///     net_weekly: Decimal::from_str("2338.80").unwrap(),
/// };
/// assert!(breakdown.net_weekly <= breakdown.weekly_gross);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Total weekly pay offered.
    pub weekly_gross: Decimal,
    /// Hours per week the offer covers.
    pub hours: Decimal,
    /// Tax-free portion, never above the ceiling or the gross.
    pub stipend_weekly: Decimal,
    /// Portion treated as ordinary wage.
    pub taxable_weekly: Decimal,
    /// Taxable wage per hour, rounded to cents.
    pub taxable_hourly: Decimal,
    /// Flat-rate tax approximation, rounded to cents.
    pub tax_estimate_weekly: Decimal,
    /// Gross less the tax estimate, rounded to cents.
    pub net_weekly: Decimal,
}
