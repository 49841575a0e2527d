//! Offer verdict: a qualitative rating of the stipend share.

use rust_decimal::Decimal;

use super::rounding::round_whole;
use crate::models::{AuditStep, ComparisonBasisKind, OfferLabel, OfferVerdict};

/// Share of the ceiling a well-negotiated offer reaches; the middle of the typical band.
const TARGET_PERCENT: u32 = 90;
const TOP_PERCENT: u32 = 95;
const TYPICAL_PERCENT: u32 = 85;
const BELOW_AVERAGE_PERCENT: u32 = 80;
const TYPICAL_BAND: &str = "85-95%";

/// The result of rating an offer, including the audit step.
#[derive(Debug, Clone)]
pub struct OfferVerdictResult {
    /// The verdict.
    pub verdict: OfferVerdict,
    /// The audit step recording this rating.
    pub audit_step: AuditStep,
}

impl OfferLabel {
    /// Rates a whole-number percentage of the ceiling.
    pub fn for_percent(pct: Decimal) -> Self {
        if pct >= Decimal::from(TOP_PERCENT) {
            OfferLabel::Top
        } else if pct >= Decimal::from(TYPICAL_PERCENT) {
            OfferLabel::Typical
        } else if pct >= Decimal::from(BELOW_AVERAGE_PERCENT) {
            OfferLabel::BelowAverage
        } else {
            OfferLabel::Low
        }
    }
}

/// Rates a stipend against its comparison basis.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_offer_verdict;
/// use stipend_engine::models::{ComparisonBasisKind, OfferLabel};
/// use rust_decimal::Decimal;
///
/// let result = derive_offer_verdict(
///     Decimal::from(1694),
///     Decimal::from(1355),
///     ComparisonBasisKind::FullPerDiem,
///     1,
/// );
///
/// assert_eq!(result.verdict.label, OfferLabel::BelowAverage);
/// assert_eq!(result.verdict.target_stipend_weekly, Decimal::from(1525));
/// assert_eq!(result.verdict.delta_to_typical_weekly, Decimal::from(170));
/// ```
pub fn derive_offer_verdict(
    basis: Decimal,
    your_stipend: Decimal,
    basis_kind: ComparisonBasisKind,
    step_number: u32,
) -> OfferVerdictResult {
    let stipend_pct_of_gsa = if basis > Decimal::ZERO {
        round_whole(your_stipend / basis * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    let label = OfferLabel::for_percent(stipend_pct_of_gsa);
    let target_stipend_weekly =
        round_whole(basis * Decimal::from(TARGET_PERCENT) / Decimal::ONE_HUNDRED);
    let delta_to_typical_weekly = target_stipend_weekly - your_stipend;

    let verdict = OfferVerdict {
        stipend_pct_of_gsa,
        label,
        typical_band: TYPICAL_BAND.to_string(),
        target_stipend_weekly,
        delta_to_typical_weekly,
        gsa_comparison_basis: basis_kind,
    };

    let reasoning = if delta_to_typical_weekly > Decimal::ZERO {
        format!(
            "Stipend is {}% of the ceiling; ${} per week short of a {}% offer",
            stipend_pct_of_gsa.normalize(),
            delta_to_typical_weekly.normalize(),
            TARGET_PERCENT
        )
    } else {
        format!(
            "Stipend is {}% of the ceiling; at or above a {}% offer",
            stipend_pct_of_gsa.normalize(),
            TARGET_PERCENT
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "offer_verdict".to_string(),
        rule_name: "Offer Verdict".to_string(),
        reference: format!("Typical agency band {}", TYPICAL_BAND),
        input: serde_json::json!({
            "basis": basis.normalize().to_string(),
            "your_stipend": your_stipend.normalize().to_string(),
            "basis_kind": basis_kind
        }),
        output: serde_json::json!({
            "stipend_pct_of_gsa": stipend_pct_of_gsa.normalize().to_string(),
            "label": label,
            "target_stipend_weekly": target_stipend_weekly.normalize().to_string(),
            "delta_to_typical_weekly": delta_to_typical_weekly.normalize().to_string()
        }),
        reasoning,
    };

    OfferVerdictResult {
        verdict,
        audit_step,
    }
}
