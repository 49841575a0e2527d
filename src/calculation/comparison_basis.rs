//! GSA comparison basis.
//!
//! When the employer provides housing the worker has no lodging cost, so a
//! fair comparison uses only the M&IE part of the federal rate.

use rust_decimal::Decimal;

use super::rounding::round_cents;
use crate::models::{AuditStep, ComparisonBasisKind, HousingModel};

/// The result of selecting the comparison basis.
#[derive(Debug, Clone)]
pub struct ComparisonBasisResult {
    /// Weekly figure offers are compared against.
    pub comparison_weekly: Decimal,
    /// Which part of the per diem the figure covers.
    pub kind: ComparisonBasisKind,
    /// The audit step recording this selection.
    pub audit_step: AuditStep,
}

/// Selects the weekly ceiling an offer should be compared against.
///
/// * `HousingModel::SelfSourced` - the full weekly ceiling
/// * `HousingModel::Company` - `meals_daily × per_diem_days`, rounded to cents
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::gsa_comparison_weekly;
/// use stipend_engine::models::HousingModel;
/// use rust_decimal::Decimal;
///
/// let own = gsa_comparison_weekly(Decimal::from(1694), Decimal::from(86), HousingModel::SelfSourced, 7, 1);
/// assert_eq!(own.comparison_weekly, Decimal::from(1694));
///
/// let company = gsa_comparison_weekly(Decimal::from(1694), Decimal::from(86), HousingModel::Company, 6, 1);
/// assert_eq!(company.comparison_weekly, Decimal::from(516));
/// ```
pub fn gsa_comparison_weekly(
    weekly_max: Decimal,
    meals_daily: Decimal,
    housing_model: HousingModel,
    per_diem_days: u32,
    step_number: u32,
) -> ComparisonBasisResult {
    let (comparison_weekly, kind, reasoning) = match housing_model {
        HousingModel::Company => {
            let meals_only = round_cents(meals_daily * Decimal::from(per_diem_days));
            (
                meals_only,
                ComparisonBasisKind::MealsOnly,
                format!(
                    "Company-provided housing: compare against M&IE only, ${} × {} days = ${}",
                    meals_daily.normalize(),
                    per_diem_days,
                    meals_only.normalize()
                ),
            )
        }
        HousingModel::SelfSourced => (
            weekly_max,
            ComparisonBasisKind::FullPerDiem,
            format!(
                "Self-sourced housing: compare against full weekly ceiling ${}",
                weekly_max.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "gsa_comparison_basis".to_string(),
        rule_name: "GSA Comparison Basis".to_string(),
        reference: "GSA lodging + M&IE, or M&IE only".to_string(),
        input: serde_json::json!({
            "weekly_max": weekly_max.normalize().to_string(),
            "meals_daily": meals_daily.normalize().to_string(),
            "housing_model": housing_model,
            "per_diem_days": per_diem_days
        }),
        output: serde_json::json!({
            "comparison_weekly": comparison_weekly.normalize().to_string(),
            "basis": kind
        }),
        reasoning,
    };

    ComparisonBasisResult {
        comparison_weekly,
        kind,
        audit_step,
    }
}
