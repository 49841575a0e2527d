//! Housing surplus against the local rent benchmark.

use rust_decimal::Decimal;

use super::gsa_totals::DAYS_PER_MONTH;
use crate::models::{AuditStep, HousingData};

/// The result of the housing comparison, including the audit step.
#[derive(Debug, Clone)]
pub struct HousingDataResult {
    /// Rent, monthly stipend estimate and surplus.
    pub housing: HousingData,
    /// The audit step recording this comparison.
    pub audit_step: AuditStep,
}

/// Compares the monthly per diem ceiling with local one-bedroom rent.
///
/// The surplus is signed and never clamped: a negative value means the per
/// diem does not cover local housing.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::derive_housing_data;
/// use rust_decimal::Decimal;
///
/// let result = derive_housing_data(Decimal::from(100), Decimal::from(30), Decimal::from(5000), 1);
/// assert_eq!(result.housing.stipend_surplus_monthly, Decimal::from(-1100));
/// ```
pub fn derive_housing_data(
    lodging_daily: Decimal,
    meals_daily: Decimal,
    hud_fmr_1br: Decimal,
    step_number: u32,
) -> HousingDataResult {
    let stipend_monthly_est = (lodging_daily + meals_daily) * DAYS_PER_MONTH;
    let stipend_surplus_monthly = stipend_monthly_est - hud_fmr_1br;

    let reasoning = if stipend_surplus_monthly < Decimal::ZERO {
        format!(
            "Monthly ceiling ${} falls ${} short of ${} one-bedroom rent",
            stipend_monthly_est.normalize(),
            (-stipend_surplus_monthly).normalize(),
            hud_fmr_1br.normalize()
        )
    } else {
        format!(
            "Monthly ceiling ${} less ${} one-bedroom rent leaves ${}",
            stipend_monthly_est.normalize(),
            hud_fmr_1br.normalize(),
            stipend_surplus_monthly.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_surplus".to_string(),
        rule_name: "Housing Surplus".to_string(),
        reference: "HUD Fair Market Rent (1BR)".to_string(),
        input: serde_json::json!({
            "lodging_daily": lodging_daily.normalize().to_string(),
            "meals_daily": meals_daily.normalize().to_string(),
            "hud_fmr_1br": hud_fmr_1br.normalize().to_string()
        }),
        output: serde_json::json!({
            "stipend_monthly_est": stipend_monthly_est.normalize().to_string(),
            "stipend_surplus_monthly": stipend_surplus_monthly.normalize().to_string()
        }),
        reasoning,
    };

    HousingDataResult {
        housing: HousingData {
            hud_fmr_1br,
            stipend_monthly_est,
            stipend_surplus_monthly,
        },
        audit_step,
    }
}
