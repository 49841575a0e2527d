//! Multi-week contract projection.

use rust_decimal::Decimal;

use super::rounding::round_whole;
use crate::models::{AuditStep, ContractProjection, PayBreakdown};

/// Standard travel contract length in weeks.
pub const DEFAULT_CONTRACT_WEEKS: u32 = 13;

/// The result of projecting a contract, including the audit step.
#[derive(Debug, Clone)]
pub struct ContractProjectionResult {
    /// The contract totals.
    pub projection: ContractProjection,
    /// The audit step recording this projection.
    pub audit_step: AuditStep,
}

/// Multiplies weekly figures by the contract length.
///
/// Each total is rounded to whole currency once, after multiplying, so
/// per-week rounding error does not compound.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::{derive_contract_projection, DEFAULT_CONTRACT_WEEKS};
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
///     tax_estimate_weekly: Decimal::from_str("161.2").unwrap(),
///     net_weekly: Decimal::from_str("2338.8").unwrap(),
/// };
///
/// let result = derive_contract_projection(&breakdown, DEFAULT_CONTRACT_WEEKS, 1);
/// assert_eq!(result.projection.net_estimate, Decimal::from(30404));
/// ```
pub fn derive_contract_projection(
    breakdown: &PayBreakdown,
    weeks: u32,
    step_number: u32,
) -> ContractProjectionResult {
    let multiplier = Decimal::from(weeks);

    let projection = ContractProjection {
        weeks,
        gross: round_whole(breakdown.weekly_gross * multiplier),
        net_estimate: round_whole(breakdown.net_weekly * multiplier),
        tax_free_total: round_whole(breakdown.stipend_weekly * multiplier),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "contract_projection".to_string(),
        rule_name: "Contract Projection".to_string(),
        reference: format!("{}-week contract", weeks),
        input: serde_json::json!({
            "weeks": weeks,
            "weekly_gross": breakdown.weekly_gross.normalize().to_string(),
            "net_weekly": breakdown.net_weekly.normalize().to_string(),
            "stipend_weekly": breakdown.stipend_weekly.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross": projection.gross.normalize().to_string(),
            "net_estimate": projection.net_estimate.normalize().to_string(),
            "tax_free_total": projection.tax_free_total.normalize().to_string()
        }),
        reasoning: format!(
            "{} weeks: ${} gross, ${} net, ${} tax-free",
            weeks,
            projection.gross.normalize(),
            projection.net_estimate.normalize(),
            projection.tax_free_total.normalize()
        ),
    };

    ContractProjectionResult {
        projection,
        audit_step,
    }
}
