//! Full financials derivation.
//!
//! Composes every derivation in order, numbering audit steps as it goes.
//! Both offer shapes normalize into a common [`PayBreakdown`] before the
//! housing, negotiation and contract figures are derived.
//!
//! [`PayBreakdown`]: crate::models::PayBreakdown

use rust_decimal::Decimal;
use tracing::debug;

use super::comparison_basis::gsa_comparison_weekly;
use super::construction_pay::{compute_construction_pay, normalize_construction};
use super::contract_projection::derive_contract_projection;
use super::gsa_totals::derive_gsa_totals;
use super::housing_surplus::derive_housing_data;
use super::insurance_estimate::estimate_insurance_weekly;
use super::negotiation_bands::derive_negotiation_bands;
use super::offer_verdict::derive_offer_verdict;
use super::pay_breakdown::derive_pay_breakdown;
use super::rounding::round_cents;
use super::specialty_tier::SpecialtyTier;
use crate::config::PolicyConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ComparisonBasisKind, ConstructionBreakdown,
    FinancialsInput, FinancialsResult, Offer, PayBreakdown,
};

/// Sequential audit step numbering.
#[derive(Debug, Default)]
struct StepCounter {
    next: u32,
}

impl StepCounter {
    fn take(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

/// Pay figures for one offer, normalized to the common shape.
struct NormalizedOffer {
    breakdown: PayBreakdown,
    construction: Option<ConstructionBreakdown>,
    comparison_weekly: Decimal,
    basis_kind: ComparisonBasisKind,
    scored_stipend: Decimal,
}

/// Derives every financial figure for an offer.
///
/// Never fails: unusual numeric input degrades to zeros, and anything worth
/// a second look is reported as a warning in the audit trace.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_financials;
/// use stipend_engine::config::PolicyConfig;
/// use stipend_engine::models::{BundledOffer, FinancialsInput, InsuranceRequest, Offer, RateInputs};
/// use rust_decimal::Decimal;
///
/// let input = FinancialsInput {
///     offer: Offer::Bundled(BundledOffer {
///         weekly_gross: Decimal::from(2500),
///         hours: Decimal::from(36),
///     }),
///     rates: RateInputs {
///         lodging_daily: Decimal::from(156),
///         meals_daily: Decimal::from(86),
///         fiscal_year: 2026,
///     },
///     hud_fmr_1br: Decimal::from(2140),
///     contract_weeks: None,
///     specialty: None,
///     insurance: InsuranceRequest::default(),
/// };
///
/// let result = derive_financials(&input, &PolicyConfig::default());
///
/// assert_eq!(result.breakdown.stipend_weekly, Decimal::from(1694));
/// assert_eq!(result.contract.net_estimate, Decimal::from(30404));
/// ```
pub fn derive_financials(input: &FinancialsInput, policy: &PolicyConfig) -> FinancialsResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut counter = StepCounter::default();
    let tax_rate = policy.tax.flat_rate_estimate;

    let gsa_result = derive_gsa_totals(
        input.rates.lodging_daily,
        input.rates.meals_daily,
        input.rates.fiscal_year,
        counter.take(),
    );
    let gsa = gsa_result.totals;
    steps.push(gsa_result.audit_step);

    let normalized = match &input.offer {
        Offer::Bundled(offer) => {
            let result = derive_pay_breakdown(
                offer.weekly_gross,
                gsa.weekly_max,
                offer.hours,
                tax_rate,
                counter.take(),
            );
            steps.push(result.audit_step);

            if let Some(warning) = taxable_floor_warning(&result.breakdown, input.specialty.as_deref()) {
                warnings.push(warning);
            }

            NormalizedOffer {
                scored_stipend: result.breakdown.stipend_weekly,
                breakdown: result.breakdown,
                construction: None,
                comparison_weekly: gsa.weekly_max,
                basis_kind: ComparisonBasisKind::FullPerDiem,
            }
        }
        Offer::Construction(offer) => {
            let pay = compute_construction_pay(offer, &policy.overtime, counter.take());
            steps.push(pay.audit_step);
            warnings.extend(pay.warning);

            let basis = gsa_comparison_weekly(
                gsa.weekly_max,
                gsa.meals_daily,
                offer.housing_model,
                offer.per_diem_days,
                counter.take(),
            );
            steps.push(basis.audit_step);

            let normalized =
                normalize_construction(&pay.breakdown, basis.comparison_weekly, tax_rate, counter.take());
            steps.push(normalized.audit_step);

            NormalizedOffer {
                breakdown: normalized.breakdown,
                scored_stipend: pay.breakdown.weekly_per_diem,
                construction: Some(pay.breakdown),
                comparison_weekly: basis.comparison_weekly,
                basis_kind: basis.kind,
            }
        }
    };

    let housing_result = derive_housing_data(
        input.rates.lodging_daily,
        input.rates.meals_daily,
        input.hud_fmr_1br,
        counter.take(),
    );
    steps.push(housing_result.audit_step);

    let negotiation_result = derive_negotiation_bands(
        normalized.comparison_weekly,
        normalized.scored_stipend,
        counter.take(),
    );
    steps.push(negotiation_result.audit_step);

    let insurance_result = estimate_insurance_weekly(&input.insurance, counter.take());
    steps.push(insurance_result.audit_step);
    let insurance = insurance_result.estimate;
    let net_after_insurance_weekly = round_cents(
        normalized.breakdown.net_weekly - insurance.weekly_mid.unwrap_or(Decimal::ZERO),
    );

    let verdict_result = derive_offer_verdict(
        normalized.comparison_weekly,
        normalized.scored_stipend,
        normalized.basis_kind,
        counter.take(),
    );
    steps.push(verdict_result.audit_step);

    let weeks = input.contract_weeks.unwrap_or(policy.contract.default_weeks);
    let contract_result = derive_contract_projection(&normalized.breakdown, weeks, counter.take());
    steps.push(contract_result.audit_step);

    debug!(
        mode = ?input.offer.mode(),
        fiscal_year = gsa.fiscal_year,
        stipend_weekly = %normalized.breakdown.stipend_weekly,
        net_weekly = %normalized.breakdown.net_weekly,
        steps = steps.len(),
        warnings = warnings.len(),
        "Financials derived"
    );

    FinancialsResult {
        mode: input.offer.mode(),
        gsa,
        breakdown: normalized.breakdown,
        construction: normalized.construction,
        gsa_comparison_weekly: normalized.comparison_weekly,
        housing: housing_result.housing,
        negotiation: negotiation_result.bands,
        insurance,
        net_after_insurance_weekly,
        verdict: verdict_result.verdict,
        contract: contract_result.projection,
        audit_trace: AuditTrace { steps, warnings },
    }
}

/// Flags a bundled taxable hourly rate below the specialty's floor.
fn taxable_floor_warning(breakdown: &PayBreakdown, specialty: Option<&str>) -> Option<AuditWarning> {
    let specialty = specialty.map(str::trim).filter(|s| !s.is_empty())?;
    if breakdown.hours <= Decimal::ZERO {
        return None;
    }

    let tier = SpecialtyTier::for_specialty(specialty);
    let floor = tier.floor();
    if breakdown.taxable_hourly >= floor {
        return None;
    }

    Some(AuditWarning {
        code: "TAXABLE_WAGE_BELOW_FLOOR".to_string(),
        message: format!(
            "Taxable hourly ${} is below the ${} floor for {} ({})",
            breakdown.taxable_hourly.normalize(),
            floor.normalize(),
            specialty,
            tier.description()
        ),
        severity: "medium".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BundledOffer, ConstructionInput, ConstructionSchedule, HousingModel, InsurancePlan,
        InsuranceRequest, OfferLabel, OfferMode, RateInputs,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates(lodging: &str, meals: &str) -> RateInputs {
        RateInputs {
            lodging_daily: dec(lodging),
            meals_daily: dec(meals),
            fiscal_year: 2026,
        }
    }

    fn bundled_input(gross: &str, hours: &str) -> FinancialsInput {
        FinancialsInput {
            offer: Offer::Bundled(BundledOffer {
                weekly_gross: dec(gross),
                hours: dec(hours),
            }),
            rates: rates("156", "86"),
            hud_fmr_1br: dec("2140"),
            contract_weeks: None,
            specialty: None,
            insurance: InsuranceRequest::default(),
        }
    }

    fn construction_input(housing_model: HousingModel) -> FinancialsInput {
        FinancialsInput {
            offer: Offer::Construction(ConstructionInput {
                hourly_rate: dec("35"),
                daily_per_diem: dec("120"),
                per_diem_days: 7,
                schedule: ConstructionSchedule::FiveByTen,
                custom_hours: None,
                housing_model,
            }),
            rates: rates("156", "68"),
            hud_fmr_1br: dec("1800"),
            contract_weeks: Some(13),
            specialty: None,
            insurance: InsuranceRequest::default(),
        }
    }

    /// FP-001: bundled offer end to end
    #[test]
    fn test_fp_001_bundled_offer() {
        let result = derive_financials(&bundled_input("2500", "36"), &PolicyConfig::default());

        assert_eq!(result.mode, OfferMode::Bundled);
        assert_eq!(result.gsa.weekly_max, dec("1694"));
        assert_eq!(result.gsa.monthly_max, dec("7260"));
        assert_eq!(result.breakdown.stipend_weekly, dec("1694"));
        assert_eq!(result.breakdown.taxable_weekly, dec("806"));
        assert_eq!(result.breakdown.taxable_hourly, dec("22.39"));
        assert_eq!(result.breakdown.tax_estimate_weekly, dec("161.2"));
        assert_eq!(result.breakdown.net_weekly, dec("2338.8"));
        assert!(result.construction.is_none());
        assert_eq!(result.gsa_comparison_weekly, dec("1694"));
        assert_eq!(result.housing.stipend_surplus_monthly, dec("5120"));
        assert_eq!(result.negotiation.pct_of_max, dec("100"));
        assert_eq!(result.verdict.label, OfferLabel::Top);
        assert_eq!(result.contract.gross, dec("32500"));
        assert_eq!(result.contract.tax_free_total, dec("22022"));
        assert_eq!(result.contract.net_estimate, dec("30404"));
    }

    /// FP-002: audit steps are numbered in order
    #[test]
    fn test_fp_002_audit_steps_sequential() {
        let result = derive_financials(&bundled_input("2500", "36"), &PolicyConfig::default());
        let steps = &result.audit_trace.steps;

        assert_eq!(steps.len(), 7);
        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
        assert_eq!(steps[0].rule_id, "gsa_totals");
        assert_eq!(steps[1].rule_id, "pay_breakdown");
        assert_eq!(steps[6].rule_id, "contract_projection");
    }

    /// FP-003: construction offer with self-sourced housing
    #[test]
    fn test_fp_003_construction_self_sourced() {
        let result = derive_financials(&construction_input(HousingModel::SelfSourced), &PolicyConfig::default());

        assert_eq!(result.mode, OfferMode::Construction);
        let construction = result.construction.as_ref().unwrap();
        assert_eq!(construction.weekly_gross_total, dec("2765"));
        assert_eq!(result.gsa_comparison_weekly, dec("1568"));
        assert_eq!(result.breakdown.stipend_weekly, dec("840"));
        assert_eq!(result.breakdown.taxable_weekly, dec("1925"));
        assert_eq!(result.breakdown.net_weekly, dec("2380"));
        // 840 / 1568 = 53.57%
        assert_eq!(result.negotiation.pct_of_max, dec("54"));
        assert_eq!(result.verdict.label, OfferLabel::Low);
        assert_eq!(result.verdict.gsa_comparison_basis, ComparisonBasisKind::FullPerDiem);
    }

    /// FP-004: company housing compares the per diem with M&IE only
    #[test]
    fn test_fp_004_construction_company_housing() {
        let result = derive_financials(&construction_input(HousingModel::Company), &PolicyConfig::default());

        assert_eq!(result.gsa_comparison_weekly, dec("476"));
        assert_eq!(result.breakdown.stipend_weekly, dec("476"));
        assert_eq!(result.breakdown.taxable_weekly, dec("2289"));
        assert_eq!(result.negotiation.your_stipend, dec("840"));
        assert_eq!(result.negotiation.pct_of_max, dec("176"));
        assert_eq!(result.verdict.gsa_comparison_basis, ComparisonBasisKind::MealsOnly);
    }

    /// FP-005: insurance midpoint reduces the net
    #[test]
    fn test_fp_005_net_after_insurance() {
        let mut input = bundled_input("2500", "36");
        input.insurance = InsuranceRequest {
            agency_name: Some("Aya".to_string()),
            plan: InsurancePlan::Single,
            weekly_override: None,
        };

        let result = derive_financials(&input, &PolicyConfig::default());

        assert_eq!(result.insurance.weekly_mid, Some(dec("150")));
        assert_eq!(result.net_after_insurance_weekly, dec("2188.8"));
    }

    /// FP-006: unknown premium leaves the net unchanged
    #[test]
    fn test_fp_006_unknown_premium_leaves_net() {
        let mut input = bundled_input("2500", "36");
        input.insurance = InsuranceRequest {
            agency_name: Some("Host Healthcare".to_string()),
            plan: InsurancePlan::Single,
            weekly_override: None,
        };

        let result = derive_financials(&input, &PolicyConfig::default());

        assert_eq!(result.insurance.weekly_mid, None);
        assert_eq!(result.net_after_insurance_weekly, result.breakdown.net_weekly);
    }

    /// FP-007: low taxable hourly for a Tier A specialty is flagged, not changed
    #[test]
    fn test_fp_007_taxable_floor_warning() {
        let mut input = bundled_input("2000", "36");
        input.specialty = Some("PT".to_string());

        let result = derive_financials(&input, &PolicyConfig::default());

        // 306 / 36 = 8.50
        assert_eq!(result.breakdown.taxable_hourly, dec("8.5"));
        assert_eq!(result.breakdown.stipend_weekly, dec("1694"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "TAXABLE_WAGE_BELOW_FLOOR");
    }

    /// FP-008: no specialty, no floor check
    #[test]
    fn test_fp_008_no_specialty_no_warning() {
        let result = derive_financials(&bundled_input("2000", "36"), &PolicyConfig::default());
        assert!(result.audit_trace.warnings.is_empty());
    }

    /// FP-009: contract length falls back to policy
    #[test]
    fn test_fp_009_contract_weeks_from_policy() {
        let mut policy = PolicyConfig::default();
        policy.contract.default_weeks = 8;

        let result = derive_financials(&bundled_input("2500", "36"), &policy);

        assert_eq!(result.contract.weeks, 8);
        assert_eq!(result.contract.gross, dec("20000"));
    }

    /// FP-010: tax rate comes from policy
    #[test]
    fn test_fp_010_tax_rate_from_policy() {
        let mut policy = PolicyConfig::default();
        policy.tax.flat_rate_estimate = dec("0.25");

        let result = derive_financials(&bundled_input("2500", "36"), &policy);

        assert_eq!(result.breakdown.tax_estimate_weekly, dec("201.5"));
        assert_eq!(result.breakdown.net_weekly, dec("2298.5"));
    }

    /// FP-011: zero rates degrade without failing
    #[test]
    fn test_fp_011_zero_rates() {
        let mut input = bundled_input("1000", "0");
        input.rates = rates("0", "0");

        let result = derive_financials(&input, &PolicyConfig::default());

        assert_eq!(result.breakdown.stipend_weekly, Decimal::ZERO);
        assert_eq!(result.breakdown.taxable_weekly, dec("1000"));
        assert_eq!(result.breakdown.taxable_hourly, Decimal::ZERO);
        assert_eq!(result.negotiation.pct_of_max, Decimal::ZERO);
    }

    /// FP-012: unrecognized schedule warns and assumes default hours
    #[test]
    fn test_fp_012_unrecognized_schedule_warns() {
        let mut input = construction_input(HousingModel::SelfSourced);
        if let Offer::Construction(offer) = &mut input.offer {
            offer.schedule = ConstructionSchedule::from("9x9".to_string());
        }

        let result = derive_financials(&input, &PolicyConfig::default());

        assert_eq!(result.construction.unwrap().total_hours, dec("50"));
        assert_eq!(result.audit_trace.warnings[0].code, "UNRECOGNIZED_SCHEDULE");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let input = construction_input(HousingModel::Company);
        let policy = PolicyConfig::default();

        assert_eq!(derive_financials(&input, &policy), derive_financials(&input, &policy));
    }
}
