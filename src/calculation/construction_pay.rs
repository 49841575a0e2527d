//! Construction pay: weekly wage with overtime plus a separate per diem.
//!
//! Unlike the bundled model, wage and per diem are quoted separately and
//! summed into a weekly gross. Overtime follows a single weekly threshold;
//! daily overtime triggers are not modelled.

use rust_decimal::Decimal;

use super::pay_breakdown::{PayBreakdownResult, breakdown_output, finish_breakdown};
use super::rounding::round_cents;
use crate::config::OvertimePolicy;
use crate::models::{
    AuditStep, AuditWarning, ConstructionBreakdown, ConstructionInput, ConstructionSchedule,
    DEFAULT_SCHEDULE_HOURS,
};

/// The result of computing construction pay.
#[derive(Debug, Clone)]
pub struct ConstructionPayResult {
    /// The wage, overtime and per diem breakdown.
    pub breakdown: ConstructionBreakdown,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
    /// Set when the schedule key was unknown and the default hours were used.
    pub warning: Option<AuditWarning>,
}

/// Resolves total weekly hours for a schedule.
///
/// Custom schedules use the caller's hours; a custom schedule without hours
/// and any unrecognized key fall back to [`DEFAULT_SCHEDULE_HOURS`].
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::schedule_hours;
/// use stipend_engine::models::ConstructionSchedule;
/// use rust_decimal::Decimal;
///
/// assert_eq!(schedule_hours(&ConstructionSchedule::SevenByTwelve, None), Decimal::from(84));
/// assert_eq!(schedule_hours(&ConstructionSchedule::Custom, Some(Decimal::from(55))), Decimal::from(55));
/// assert_eq!(schedule_hours(&ConstructionSchedule::Custom, None), Decimal::from(50));
/// ```
pub fn schedule_hours(schedule: &ConstructionSchedule, custom_hours: Option<Decimal>) -> Decimal {
    match schedule {
        ConstructionSchedule::Custom => custom_hours.unwrap_or(DEFAULT_SCHEDULE_HOURS),
        other => other.fixed_hours().unwrap_or(DEFAULT_SCHEDULE_HOURS),
    }
}

/// Computes weekly wage, overtime and per diem for an hourly offer.
///
/// Every money figure is rounded to cents as it is produced, so sums are
/// taken over already-rounded parts.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::compute_construction_pay;
/// use stipend_engine::config::OvertimePolicy;
/// use stipend_engine::models::{ConstructionInput, ConstructionSchedule, HousingModel};
/// use rust_decimal::Decimal;
///
/// let input = ConstructionInput {
///     hourly_rate: Decimal::from(35),
///     daily_per_diem: Decimal::from(120),
///     per_diem_days: 7,
///     schedule: ConstructionSchedule::FiveByTen,
///     custom_hours: None,
///     housing_model: HousingModel::SelfSourced,
/// };
///
/// let result = compute_construction_pay(&input, &OvertimePolicy::default(), 1);
///
/// assert_eq!(result.breakdown.ot_pay, Decimal::from(525));
/// assert_eq!(result.breakdown.weekly_gross_total, Decimal::from(2765));
/// ```
pub fn compute_construction_pay(
    input: &ConstructionInput,
    overtime: &OvertimePolicy,
    step_number: u32,
) -> ConstructionPayResult {
    let total_hours = schedule_hours(&input.schedule, input.custom_hours);
    let threshold = overtime.weekly_threshold_hours;

    let straight_hours = total_hours.min(threshold);
    let ot_hours = (total_hours - threshold).max(Decimal::ZERO);

    let straight_pay = round_cents(input.hourly_rate * straight_hours);
    let ot_pay = round_cents(input.hourly_rate * overtime.multiplier * ot_hours);
    let weekly_wage = round_cents(straight_pay + ot_pay);
    let weekly_per_diem = round_cents(input.daily_per_diem * Decimal::from(input.per_diem_days));
    let weekly_gross_total = round_cents(weekly_wage + weekly_per_diem);

    let warning = input.schedule.is_unrecognized().then(|| AuditWarning {
        code: "UNRECOGNIZED_SCHEDULE".to_string(),
        message: format!(
            "Schedule '{}' is not recognized; assumed {} hours per week",
            input.schedule.key(),
            DEFAULT_SCHEDULE_HOURS
        ),
        severity: "low".to_string(),
    });

    let reasoning = if ot_hours > Decimal::ZERO {
        format!(
            "{} schedule: {}h × ${} = ${} straight + {}h × ${} × {} = ${} overtime; per diem ${} × {} days = ${}; gross ${}",
            input.schedule.label(),
            straight_hours.normalize(),
            input.hourly_rate.normalize(),
            straight_pay.normalize(),
            ot_hours.normalize(),
            input.hourly_rate.normalize(),
            overtime.multiplier.normalize(),
            ot_pay.normalize(),
            input.daily_per_diem.normalize(),
            input.per_diem_days,
            weekly_per_diem.normalize(),
            weekly_gross_total.normalize()
        )
    } else {
        format!(
            "{} schedule: {}h × ${} = ${}, within {}h overtime threshold; per diem ${} × {} days = ${}; gross ${}",
            input.schedule.label(),
            straight_hours.normalize(),
            input.hourly_rate.normalize(),
            straight_pay.normalize(),
            threshold.normalize(),
            input.daily_per_diem.normalize(),
            input.per_diem_days,
            weekly_per_diem.normalize(),
            weekly_gross_total.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "construction_pay".to_string(),
        rule_name: "Construction Pay With Overtime".to_string(),
        reference: format!(
            "Weekly overtime beyond {}h at {}×",
            threshold.normalize(),
            overtime.multiplier.normalize()
        ),
        input: serde_json::json!({
            "hourly_rate": input.hourly_rate.normalize().to_string(),
            "schedule": input.schedule.key(),
            "total_hours": total_hours.normalize().to_string(),
            "daily_per_diem": input.daily_per_diem.normalize().to_string(),
            "per_diem_days": input.per_diem_days
        }),
        output: serde_json::json!({
            "straight_hours": straight_hours.normalize().to_string(),
            "ot_hours": ot_hours.normalize().to_string(),
            "straight_pay": straight_pay.normalize().to_string(),
            "ot_pay": ot_pay.normalize().to_string(),
            "weekly_wage": weekly_wage.normalize().to_string(),
            "weekly_per_diem": weekly_per_diem.normalize().to_string(),
            "weekly_gross_total": weekly_gross_total.normalize().to_string()
        }),
        reasoning,
    };

    ConstructionPayResult {
        breakdown: ConstructionBreakdown {
            straight_hours,
            ot_hours,
            straight_pay,
            ot_pay,
            weekly_wage,
            weekly_per_diem,
            weekly_gross_total,
            total_hours,
        },
        audit_step,
        warning,
    }
}

/// Normalizes a construction breakdown into the common [`PayBreakdown`] shape.
///
/// The per diem is the stipend, capped at the comparison basis. Wages and
/// any per diem above the basis are taxable.
///
/// [`PayBreakdown`]: crate::models::PayBreakdown
pub fn normalize_construction(
    construction: &ConstructionBreakdown,
    comparison_weekly: Decimal,
    tax_rate: Decimal,
    step_number: u32,
) -> PayBreakdownResult {
    let weekly_gross = construction.weekly_gross_total;
    let stipend_weekly = construction
        .weekly_per_diem
        .min(comparison_weekly)
        .max(Decimal::ZERO);
    let excess_per_diem = construction.weekly_per_diem - stipend_weekly;
    let taxable_weekly = (weekly_gross - stipend_weekly).max(Decimal::ZERO);

    let breakdown = finish_breakdown(
        weekly_gross,
        construction.total_hours,
        stipend_weekly,
        taxable_weekly,
        tax_rate,
    );

    let reasoning = if excess_per_diem > Decimal::ZERO {
        format!(
            "Per diem ${} exceeds ${} comparison basis; ${} reclassified as taxable alongside ${} wages",
            construction.weekly_per_diem.normalize(),
            comparison_weekly.normalize(),
            excess_per_diem.normalize(),
            construction.weekly_wage.normalize()
        )
    } else {
        format!(
            "Per diem ${} is the tax-free stipend; ${} wages are taxable",
            construction.weekly_per_diem.normalize(),
            construction.weekly_wage.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "construction_normalization".to_string(),
        rule_name: "Construction Breakdown Normalization".to_string(),
        reference: "Per diem capped at GSA comparison basis".to_string(),
        input: serde_json::json!({
            "weekly_wage": construction.weekly_wage.normalize().to_string(),
            "weekly_per_diem": construction.weekly_per_diem.normalize().to_string(),
            "comparison_weekly": comparison_weekly.normalize().to_string(),
            "tax_rate": tax_rate.normalize().to_string()
        }),
        output: breakdown_output(&breakdown, excess_per_diem > Decimal::ZERO),
        reasoning,
    };

    PayBreakdownResult {
        breakdown,
        audit_step,
    }
}
