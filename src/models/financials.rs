//! Aggregate result models for a full financials derivation.
//!
//! [`FinancialsResult`] exposes every sub-derivation under stable field
//! names so presentation and ingestion layers can consume either offer
//! shape the same way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AuditTrace, BundledOffer, ConstructionBreakdown, ConstructionInput, GsaTotals,
    InsuranceEstimate, InsuranceRequest, PayBreakdown, RateInputs,
};

/// Housing affordability against the local rent benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingData {
    /// Local one-bedroom fair market rent.
    pub hud_fmr_1br: Decimal,
    /// Monthly per diem ceiling, `(lodging + meals) × 30`.
    pub stipend_monthly_est: Decimal,
    /// Ceiling minus rent; negative when rent exceeds the stipend.
    pub stipend_surplus_monthly: Decimal,
}

/// Reference points as percentages of the comparison ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationBands {
    /// 70% of the ceiling, rounded to whole currency.
    pub pct_70: Decimal,
    /// 80% of the ceiling, rounded to whole currency.
    pub pct_80: Decimal,
    /// 95% of the ceiling, rounded to whole currency.
    pub pct_95: Decimal,
    /// The ceiling itself.
    pub pct_100: Decimal,
    /// The stipend being scored.
    pub your_stipend: Decimal,
    /// Stipend as a whole percentage of the ceiling; may exceed 100.
    pub pct_of_max: Decimal,
}

/// Multi-week totals for a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractProjection {
    /// Contract length in weeks.
    pub weeks: u32,
    /// Gross over the contract.
    pub gross: Decimal,
    /// Net estimate over the contract.
    pub net_estimate: Decimal,
    /// Tax-free stipend over the contract.
    pub tax_free_total: Decimal,
}

/// Which ceiling an offer was compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBasisKind {
    /// Lodging plus M&IE.
    FullPerDiem,
    /// M&IE only, for company-provided housing.
    MealsOnly,
}

/// Qualitative rating of an offer's stipend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferLabel {
    /// At or above 95% of the ceiling.
    Top,
    /// 85% up to 95%.
    Typical,
    /// 80% up to 85%.
    BelowAverage,
    /// Under 80%.
    Low,
}

/// A verdict on how an offer's stipend compares to the ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferVerdict {
    /// Stipend as a whole percentage of the comparison basis.
    pub stipend_pct_of_gsa: Decimal,
    /// Qualitative rating.
    pub label: OfferLabel,
    /// The band considered typical, for display.
    pub typical_band: String,
    /// Weekly stipend a well-negotiated offer reaches, 90% of the basis.
    pub target_stipend_weekly: Decimal,
    /// Target minus actual stipend; positive means money left on the table.
    pub delta_to_typical_weekly: Decimal,
    /// Which ceiling the offer was compared against.
    pub gsa_comparison_basis: ComparisonBasisKind,
}

/// The two offer shapes the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Offer {
    /// One weekly gross to split against the ceiling.
    Bundled(BundledOffer),
    /// Hourly wage plus daily per diem.
    Construction(ConstructionInput),
}

impl Offer {
    /// Returns the mode discriminant for this offer.
    pub fn mode(&self) -> OfferMode {
        match self {
            Offer::Bundled(_) => OfferMode::Bundled,
            Offer::Construction(_) => OfferMode::Construction,
        }
    }
}

/// Discriminant of [`Offer`], echoed in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferMode {
    /// Bundled weekly gross.
    Bundled,
    /// Hourly wage plus per diem.
    Construction,
}

/// Everything the pipeline needs, already resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialsInput {
    /// The pay offer.
    pub offer: Offer,
    /// Daily per diem rates for the locality.
    pub rates: RateInputs,
    /// Local one-bedroom rent benchmark.
    pub hud_fmr_1br: Decimal,
    /// Contract length; the policy default applies when absent.
    #[serde(default)]
    pub contract_weeks: Option<u32>,
    /// Worker specialty, used for the taxable wage floor check.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Insurance plan and agency.
    #[serde(default)]
    pub insurance: InsuranceRequest,
}

/// The full derivation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialsResult {
    /// Which offer shape produced this result.
    pub mode: OfferMode,
    /// Ceiling totals.
    pub gsa: GsaTotals,
    /// Common stipend/taxable breakdown.
    pub breakdown: PayBreakdown,
    /// Wage and overtime detail for hourly offers.
    pub construction: Option<ConstructionBreakdown>,
    /// The ceiling the stipend was compared against.
    pub gsa_comparison_weekly: Decimal,
    /// Housing affordability.
    pub housing: HousingData,
    /// Negotiation reference points.
    pub negotiation: NegotiationBands,
    /// Insurance premium estimate.
    pub insurance: InsuranceEstimate,
    /// Net weekly less the insurance midpoint.
    pub net_after_insurance_weekly: Decimal,
    /// Offer rating.
    pub verdict: OfferVerdict,
    /// Contract totals.
    pub contract: ContractProjection,
    /// How every figure was reached.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConstructionSchedule, HousingModel};

    #[test]
    fn test_bundled_offer_deserializes_from_mode_tag() {
        let offer: Offer =
            serde_json::from_str(r#"{"mode": "bundled", "weekly_gross": 2500, "hours": 36}"#)
                .unwrap();

        assert_eq!(offer.mode(), OfferMode::Bundled);
        match offer {
            Offer::Bundled(bundled) => {
                assert_eq!(bundled.weekly_gross, Decimal::from(2500));
                assert_eq!(bundled.hours, Decimal::from(36));
            }
            other => panic!("Expected bundled offer, got {:?}", other),
        }
    }

    #[test]
    fn test_offer_mode_wire_name_matches_request_tag() {
        let input: Offer = serde_json::from_str(
            r#"{"mode": "construction", "hourly_rate": 35, "daily_per_diem": 120,
                "per_diem_days": 7, "schedule": "5x10"}"#,
        )
        .unwrap();

        assert_eq!(input.mode(), OfferMode::Construction);
        assert_eq!(serde_json::to_value(input.mode()).unwrap(), "construction");
    }

    #[test]
    fn test_construction_offer_deserializes_with_defaults() {
        let offer: Offer = serde_json::from_str(
            r#"{"mode": "construction", "hourly_rate": 35, "daily_per_diem": 120,
                "per_diem_days": 7, "schedule": "5x10"}"#,
        )
        .unwrap();

        match offer {
            Offer::Construction(input) => {
                assert_eq!(input.schedule, ConstructionSchedule::FiveByTen);
                assert_eq!(input.housing_model, HousingModel::SelfSourced);
                assert_eq!(input.custom_hours, None);
            }
            other => panic!("Expected construction offer, got {:?}", other),
        }
    }

    #[test]
    fn test_offer_label_serialization() {
        assert_eq!(
            serde_json::to_string(&OfferLabel::BelowAverage).unwrap(),
            "\"below_average\""
        );
        assert_eq!(
            serde_json::to_string(&ComparisonBasisKind::MealsOnly).unwrap(),
            "\"meals_only\""
        );
    }

    #[test]
    fn test_money_serializes_as_json_number() {
        let projection = ContractProjection {
            weeks: 13,
            gross: Decimal::from(32500),
            net_estimate: Decimal::from(30404),
            tax_free_total: Decimal::from(22022),
        };

        let json = serde_json::to_value(&projection).unwrap();
        assert!(json["gross"].is_number());
        assert_eq!(json["gross"].as_f64(), Some(32500.0));
    }
}
