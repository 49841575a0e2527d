//! Negotiation bands.
//!
//! Reference points at 70, 80, 95 and 100 percent of the comparison ceiling,
//! plus where the worker's stipend lands. Thresholds and score share one
//! rounding helper so a boundary case can never disagree between them.

use rust_decimal::Decimal;

use super::rounding::round_whole;
use crate::models::{AuditStep, NegotiationBands};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The result of deriving negotiation bands, including the audit step.
#[derive(Debug, Clone)]
pub struct NegotiationBandsResult {
    /// The band thresholds and score.
    pub bands: NegotiationBands,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Returns `round(value × percent / 100)`.
fn band(value: Decimal, percent: u32) -> Decimal {
    round_whole(value * Decimal::from(percent) / ONE_HUNDRED)
}

/// Derives negotiation bands and the percentage-of-ceiling score.
///
/// `pct_of_max` is zero when the ceiling is not positive and is not capped
/// at 100: a stipend above the ceiling scores above 100.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_negotiation_bands;
/// use rust_decimal::Decimal;
///
/// let result = derive_negotiation_bands(Decimal::from(1694), Decimal::from(1694), 1);
///
/// assert_eq!(result.bands.pct_70, Decimal::from(1186));
/// assert_eq!(result.bands.pct_of_max, Decimal::from(100));
/// ```
pub fn derive_negotiation_bands(
    weekly_max: Decimal,
    your_stipend: Decimal,
    step_number: u32,
) -> NegotiationBandsResult {
    let pct_of_max = if weekly_max > Decimal::ZERO {
        round_whole(your_stipend / weekly_max * ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let bands = NegotiationBands {
        pct_70: band(weekly_max, 70),
        pct_80: band(weekly_max, 80),
        pct_95: band(weekly_max, 95),
        pct_100: weekly_max,
        your_stipend,
        pct_of_max,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "negotiation_bands".to_string(),
        rule_name: "Negotiation Bands".to_string(),
        reference: "Percent of GSA comparison ceiling".to_string(),
        input: serde_json::json!({
            "weekly_max": weekly_max.normalize().to_string(),
            "your_stipend": your_stipend.normalize().to_string()
        }),
        output: serde_json::json!({
            "pct_70": bands.pct_70.normalize().to_string(),
            "pct_80": bands.pct_80.normalize().to_string(),
            "pct_95": bands.pct_95.normalize().to_string(),
            "pct_of_max": bands.pct_of_max.normalize().to_string()
        }),
        reasoning: format!(
            "${} stipend is {}% of ${} ceiling",
            your_stipend.normalize(),
            pct_of_max.normalize(),
            weekly_max.normalize()
        ),
    };

    NegotiationBandsResult { bands, audit_step }
}
