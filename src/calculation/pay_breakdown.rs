//! Bundled pay breakdown.
//!
//! Splits one weekly gross figure into a tax-free stipend and a taxable
//! wage. The stipend is a cap, not an allocation: it can never exceed the
//! ceiling or what was actually offered, and every dollar above the ceiling
//! is treated as taxable wage.

use rust_decimal::Decimal;

use super::rounding::round_cents;
use crate::models::{AuditStep, PayBreakdown};

/// The result of splitting a bundled offer, including the audit step.
#[derive(Debug, Clone)]
pub struct PayBreakdownResult {
    /// The derived breakdown.
    pub breakdown: PayBreakdown,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Splits a bundled weekly gross into stipend and taxable wage.
///
/// # Arguments
///
/// * `weekly_gross` - The bundled weekly offer
/// * `weekly_max` - The weekly ceiling the stipend is capped at
/// * `hours` - Hours per week; hourly figures become zero when this is not positive
/// * `tax_rate` - Flat rate applied to the taxable wage for the tax estimate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_pay_breakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = derive_pay_breakdown(
///     Decimal::from(2500),
///     Decimal::from(1694),
///     Decimal::from(36),
///     Decimal::from_str("0.20").unwrap(),
///     1,
/// );
///
/// assert_eq!(result.breakdown.stipend_weekly, Decimal::from(1694));
/// assert_eq!(result.breakdown.taxable_weekly, Decimal::from(806));
/// assert_eq!(result.breakdown.net_weekly, Decimal::from_str("2338.8").unwrap());
/// ```
pub fn derive_pay_breakdown(
    weekly_gross: Decimal,
    weekly_max: Decimal,
    hours: Decimal,
    tax_rate: Decimal,
    step_number: u32,
) -> PayBreakdownResult {
    let stipend_weekly = weekly_max.min(weekly_gross);
    let taxable_weekly = (weekly_gross - weekly_max).max(Decimal::ZERO);
    let cap_applied = weekly_gross > weekly_max;

    let breakdown = finish_breakdown(weekly_gross, hours, stipend_weekly, taxable_weekly, tax_rate);

    let reasoning = if cap_applied {
        format!(
            "${} gross exceeds ${} ceiling: ${} stipend, ${} taxable (${}/hr over {} hours), tax est. ${} at {}",
            weekly_gross.normalize(),
            weekly_max.normalize(),
            breakdown.stipend_weekly.normalize(),
            breakdown.taxable_weekly.normalize(),
            breakdown.taxable_hourly.normalize(),
            hours.normalize(),
            breakdown.tax_estimate_weekly.normalize(),
            tax_rate.normalize()
        )
    } else {
        format!(
            "${} gross is within ${} ceiling: fully tax-free stipend, no taxable wage",
            weekly_gross.normalize(),
            weekly_max.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_breakdown".to_string(),
        rule_name: "Bundled Pay Breakdown".to_string(),
        reference: "Stipend capped at GSA weekly ceiling".to_string(),
        input: serde_json::json!({
            "weekly_gross": weekly_gross.normalize().to_string(),
            "weekly_max": weekly_max.normalize().to_string(),
            "hours": hours.normalize().to_string(),
            "tax_rate": tax_rate.normalize().to_string()
        }),
        output: breakdown_output(&breakdown, cap_applied),
        reasoning,
    };

    PayBreakdownResult {
        breakdown,
        audit_step,
    }
}

/// Fills the hourly, tax and net figures once stipend and taxable are known.
///
/// Shared with the construction normalisation so both offer shapes round
/// the same fields at the same points.
pub(crate) fn finish_breakdown(
    weekly_gross: Decimal,
    hours: Decimal,
    stipend_weekly: Decimal,
    taxable_weekly: Decimal,
    tax_rate: Decimal,
) -> PayBreakdown {
    let taxable_hourly = if hours > Decimal::ZERO {
        round_cents(taxable_weekly / hours)
    } else {
        Decimal::ZERO
    };
    let tax_estimate_weekly = round_cents(taxable_weekly * tax_rate);
    let net_weekly = round_cents(weekly_gross - tax_estimate_weekly);

    PayBreakdown {
        weekly_gross,
        hours,
        stipend_weekly,
        taxable_weekly,
        taxable_hourly,
        tax_estimate_weekly,
        net_weekly,
    }
}

pub(crate) fn breakdown_output(breakdown: &PayBreakdown, cap_applied: bool) -> serde_json::Value {
    serde_json::json!({
        "stipend_weekly": breakdown.stipend_weekly.normalize().to_string(),
        "taxable_weekly": breakdown.taxable_weekly.normalize().to_string(),
        "taxable_hourly": breakdown.taxable_hourly.normalize().to_string(),
        "tax_estimate_weekly": breakdown.tax_estimate_weekly.normalize().to_string(),
        "net_weekly": breakdown.net_weekly.normalize().to_string(),
        "cap_applied": cap_applied
    })
}
