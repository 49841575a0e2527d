//! GSA ceiling totals.
//!
//! Converts the daily lodging and M&IE rates into the weekly and monthly
//! ceilings that every other derivation compares against.

use rust_decimal::Decimal;

use crate::models::{AuditStep, GsaTotals};

/// Days in the weekly ceiling.
pub const DAYS_PER_WEEK: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Days in the monthly ceiling.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The result of deriving ceiling totals, including the audit step.
#[derive(Debug, Clone)]
pub struct GsaTotalsResult {
    /// The derived ceiling.
    pub totals: GsaTotals,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives weekly and monthly ceilings from daily federal per diem rates.
///
/// Defined for every non-negative input; zero rates give a zero ceiling.
/// The fiscal year is passed through untouched.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_gsa_totals;
/// use rust_decimal::Decimal;
///
/// let result = derive_gsa_totals(Decimal::from(156), Decimal::from(86), 2026, 1);
///
/// assert_eq!(result.totals.weekly_max, Decimal::from(1694));
/// assert_eq!(result.totals.monthly_max, Decimal::from(7260));
/// ```
pub fn derive_gsa_totals(
    lodging_daily: Decimal,
    meals_daily: Decimal,
    fiscal_year: i32,
    step_number: u32,
) -> GsaTotalsResult {
    let daily_total = lodging_daily + meals_daily;
    let weekly_max = daily_total * DAYS_PER_WEEK;
    let monthly_max = daily_total * DAYS_PER_MONTH;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gsa_totals".to_string(),
        rule_name: "GSA Ceiling Totals".to_string(),
        reference: format!("GSA per diem FY{}", fiscal_year),
        input: serde_json::json!({
            "lodging_daily": lodging_daily.normalize().to_string(),
            "meals_daily": meals_daily.normalize().to_string(),
            "fiscal_year": fiscal_year
        }),
        output: serde_json::json!({
            "weekly_max": weekly_max.normalize().to_string(),
            "monthly_max": monthly_max.normalize().to_string()
        }),
        reasoning: format!(
            "(${} lodging + ${} M&IE) = ${}/day; × 7 = ${}/week, × 30 = ${}/month",
            lodging_daily.normalize(),
            meals_daily.normalize(),
            daily_total.normalize(),
            weekly_max.normalize(),
            monthly_max.normalize()
        ),
    };

    GsaTotalsResult {
        totals: GsaTotals {
            fiscal_year,
            lodging_daily,
            meals_daily,
            weekly_max,
            monthly_max,
        },
        audit_step,
    }
}
