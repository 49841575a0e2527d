//! Hourly construction offer models.
//!
//! Construction trades quote an hourly wage and a separate daily per diem.
//! The schedule selector fixes total weekly hours, from which straight and
//! overtime hours are split.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weekly hours assumed for a custom or unrecognized schedule with no hours.
pub const DEFAULT_SCHEDULE_HOURS: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// A crew schedule, written as days × hours per day.
///
/// Unknown keys are kept as [`ConstructionSchedule::Unrecognized`] rather
/// than rejected, and fall back to [`DEFAULT_SCHEDULE_HOURS`].
///
/// # Example
///
/// ```
/// use stipend_engine::models::ConstructionSchedule;
///
/// let schedule = ConstructionSchedule::from("6x10".to_string());
/// assert_eq!(schedule, ConstructionSchedule::SixByTen);
/// assert_eq!(schedule.label(), "6×10 (60hr)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConstructionSchedule {
    /// Four 10-hour days.
    FourByTen,
    /// Five 8-hour days.
    FiveByEight,
    /// Five 10-hour days.
    FiveByTen,
    /// Six 10-hour days.
    SixByTen,
    /// Seven 12-hour days.
    SevenByTwelve,
    /// Caller-supplied weekly hours.
    Custom,
    /// A key outside the fixed table.
    Unrecognized(String),
}

impl ConstructionSchedule {
    /// Returns the wire key for the schedule.
    pub fn key(&self) -> &str {
        match self {
            ConstructionSchedule::FourByTen => "4x10",
            ConstructionSchedule::FiveByEight => "5x8",
            ConstructionSchedule::FiveByTen => "5x10",
            ConstructionSchedule::SixByTen => "6x10",
            ConstructionSchedule::SevenByTwelve => "7x12",
            ConstructionSchedule::Custom => "custom",
            ConstructionSchedule::Unrecognized(key) => key,
        }
    }

    /// Returns the fixed weekly hours, or `None` when hours come from the caller.
    pub fn fixed_hours(&self) -> Option<Decimal> {
        match self {
            ConstructionSchedule::FourByTen | ConstructionSchedule::FiveByEight => {
                Some(Decimal::from(40))
            }
            ConstructionSchedule::FiveByTen => Some(Decimal::from(50)),
            ConstructionSchedule::SixByTen => Some(Decimal::from(60)),
            ConstructionSchedule::SevenByTwelve => Some(Decimal::from(84)),
            ConstructionSchedule::Custom | ConstructionSchedule::Unrecognized(_) => None,
        }
    }

    /// Returns a display label such as `"5×10 (50hr)"`.
    pub fn label(&self) -> &str {
        match self {
            ConstructionSchedule::FourByTen => "4×10 (40hr)",
            ConstructionSchedule::FiveByEight => "5×8 (40hr)",
            ConstructionSchedule::FiveByTen => "5×10 (50hr)",
            ConstructionSchedule::SixByTen => "6×10 (60hr)",
            ConstructionSchedule::SevenByTwelve => "7×12 (84hr)",
            ConstructionSchedule::Custom => "Custom",
            ConstructionSchedule::Unrecognized(key) => key,
        }
    }

    /// Returns true if the key was not in the fixed schedule table.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, ConstructionSchedule::Unrecognized(_))
    }
}

impl From<String> for ConstructionSchedule {
    fn from(key: String) -> Self {
        match key.trim().to_lowercase().as_str() {
            "4x10" => ConstructionSchedule::FourByTen,
            "5x8" => ConstructionSchedule::FiveByEight,
            "5x10" => ConstructionSchedule::FiveByTen,
            "6x10" => ConstructionSchedule::SixByTen,
            "7x12" => ConstructionSchedule::SevenByTwelve,
            "custom" => ConstructionSchedule::Custom,
            _ => ConstructionSchedule::Unrecognized(key),
        }
    }
}

impl From<ConstructionSchedule> for String {
    fn from(schedule: ConstructionSchedule) -> Self {
        schedule.key().to_string()
    }
}

impl fmt::Display for ConstructionSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Who sources the worker's lodging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingModel {
    /// The worker finds and pays for their own housing.
    #[default]
    #[serde(rename = "self")]
    SelfSourced,
    /// The employer provides housing directly.
    Company,
}

/// An hourly-plus-per-diem construction offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionInput {
    /// Base hourly wage.
    pub hourly_rate: Decimal,
    /// Per diem paid per day.
    pub daily_per_diem: Decimal,
    /// Days per week the per diem is paid (5, 6 or 7).
    pub per_diem_days: u32,
    /// Crew schedule selector.
    pub schedule: ConstructionSchedule,
    /// Weekly hours for a custom schedule.
    #[serde(default)]
    pub custom_hours: Option<Decimal>,
    /// Who sources the worker's lodging.
    #[serde(default)]
    pub housing_model: HousingModel,
}

/// Weekly wage, overtime and per diem for a construction offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionBreakdown {
    /// Hours paid at the base rate.
    pub straight_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub ot_hours: Decimal,
    /// Straight-time wage, rounded to cents.
    pub straight_pay: Decimal,
    /// Overtime wage, rounded to cents.
    pub ot_pay: Decimal,
    /// Straight plus overtime wage.
    pub weekly_wage: Decimal,
    /// Daily per diem times per diem days.
    pub weekly_per_diem: Decimal,
    /// Wage plus per diem.
    pub weekly_gross_total: Decimal,
    /// Total scheduled hours.
    pub total_hours: Decimal,
}
