//! Configuration types for stipend derivation.
//!
//! These structures are deserialized from the YAML files in a configuration
//! directory. Every type implements [`Default`] with the values the engine
//! ships with, so a missing directory never changes behaviour silently: the
//! loader either reads the files or the caller opts into the defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_CONTRACT_WEEKS;

/// Flat-rate tax approximation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Share of taxable wages assumed lost to tax (e.g. 0.20).
    pub flat_rate_estimate: Decimal,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            flat_rate_estimate: Decimal::new(20, 2),
        }
    }
}

/// Weekly overtime rule applied to hourly construction offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePolicy {
    /// Hours per week paid at straight time.
    pub weekly_threshold_hours: Decimal,
    /// Multiplier applied to the base rate beyond the threshold.
    pub multiplier: Decimal,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: Decimal::from(40),
            multiplier: Decimal::new(15, 1),
        }
    }
}

/// Contract projection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPolicy {
    /// Contract length used when the caller does not supply one.
    pub default_weeks: u32,
}

impl Default for ContractPolicy {
    fn default() -> Self {
        Self {
            default_weeks: DEFAULT_CONTRACT_WEEKS,
        }
    }
}

/// Policy constants consumed by the derivations, from `policy.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Tax approximation.
    #[serde(default)]
    pub tax: TaxPolicy,
    /// Overtime rule.
    #[serde(default)]
    pub overtime: OvertimePolicy,
    /// Contract projection defaults.
    #[serde(default)]
    pub contract: ContractPolicy,
}

/// Range checks enforced by the request boundary before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Smallest accepted bundled weekly gross.
    pub gross_weekly_min: Decimal,
    /// Largest accepted bundled weekly gross.
    pub gross_weekly_max: Decimal,
    /// Fewest accepted hours per week.
    pub hours_min: Decimal,
    /// Most accepted hours per week.
    pub hours_max: Decimal,
    /// Lowest accepted construction hourly rate.
    pub hourly_rate_min: Decimal,
    /// Highest accepted construction hourly rate.
    pub hourly_rate_max: Decimal,
    /// Highest accepted daily lodging or M&IE rate.
    pub daily_rate_max: Decimal,
    /// Highest accepted daily per diem on a construction offer.
    pub daily_per_diem_max: Decimal,
    /// Highest accepted monthly one-bedroom rent.
    pub rent_monthly_max: Decimal,
    /// Highest accepted weekly insurance premium override.
    pub insurance_weekly_max: Decimal,
    /// Longest accepted contract, in weeks.
    pub contract_weeks_max: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            gross_weekly_min: Decimal::from(200),
            gross_weekly_max: Decimal::from(15000),
            hours_min: Decimal::from(8),
            hours_max: Decimal::from(80),
            hourly_rate_min: Decimal::from(10),
            hourly_rate_max: Decimal::from(1000),
            daily_rate_max: Decimal::from(5000),
            daily_per_diem_max: Decimal::from(5000),
            rent_monthly_max: Decimal::from(100_000),
            insurance_weekly_max: Decimal::from(5000),
            contract_weeks_max: 104,
        }
    }
}

/// Caller-side defaults and limits, from `boundary.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// One-bedroom rent used when no local benchmark exists.
    pub default_rent_1br: Decimal,
    /// Weekly hours assumed for bundled offers that omit them.
    pub default_hours: Decimal,
    /// Input range checks.
    #[serde(default)]
    pub validation: ValidationLimits,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            default_rent_1br: Decimal::from(1800),
            default_hours: Decimal::from(36),
            validation: ValidationLimits::default(),
        }
    }
}
