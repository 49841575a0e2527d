//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine policy
//! and boundary settings from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BoundaryConfig, PolicyConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml    # Tax rate, overtime rule, contract length
/// └── boundary.yaml  # Rent fallback, default hours, validation limits
/// ```
///
/// # Example
///
/// ```no_run
/// use stipend_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Tax estimate rate: {}", loader.policy().tax.flat_rate_estimate);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: PolicyConfig,
    boundary: BoundaryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, is not valid YAML, or
    /// holds a value outside the range the engine accepts.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let boundary = Self::load_yaml::<BoundaryConfig>(&path.join("boundary.yaml"))?;

        Self::from_parts(policy, boundary)
    }

    /// Builds a loader from already-deserialized parts, validating them.
    pub fn from_parts(policy: PolicyConfig, boundary: BoundaryConfig) -> EngineResult<Self> {
        validate_policy(&policy)?;
        validate_boundary(&boundary)?;
        Ok(Self { policy, boundary })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the policy constants used by the derivations.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Returns the request boundary settings.
    pub fn boundary(&self) -> &BoundaryConfig {
        &self.boundary
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_policy(policy: &PolicyConfig) -> EngineResult<()> {
    let rate = policy.tax.flat_rate_estimate;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(
            "tax.flat_rate_estimate",
            format!("must be between 0 and 1, got {}", rate),
        ));
    }
    if policy.overtime.multiplier < Decimal::ONE {
        return Err(invalid(
            "overtime.multiplier",
            format!("must be at least 1, got {}", policy.overtime.multiplier),
        ));
    }
    if policy.overtime.weekly_threshold_hours <= Decimal::ZERO {
        return Err(invalid(
            "overtime.weekly_threshold_hours",
            "must be greater than zero",
        ));
    }
    if policy.contract.default_weeks == 0 {
        return Err(invalid("contract.default_weeks", "must be at least 1"));
    }
    Ok(())
}

fn validate_boundary(boundary: &BoundaryConfig) -> EngineResult<()> {
    if boundary.default_rent_1br < Decimal::ZERO {
        return Err(invalid("default_rent_1br", "must not be negative"));
    }
    let limits = &boundary.validation;
    if limits.gross_weekly_min > limits.gross_weekly_max {
        return Err(invalid(
            "validation.gross_weekly_min",
            "must not exceed gross_weekly_max",
        ));
    }
    if limits.hours_min <= Decimal::ZERO || limits.hours_min > limits.hours_max {
        return Err(invalid(
            "validation.hours_min",
            "must be positive and not exceed hours_max",
        ));
    }
    if boundary.default_hours < limits.hours_min || boundary.default_hours > limits.hours_max {
        return Err(invalid(
            "default_hours",
            "must fall within the validation hour range",
        ));
    }
    if limits.hourly_rate_min > limits.hourly_rate_max {
        return Err(invalid(
            "validation.hourly_rate_min",
            "must not exceed hourly_rate_max",
        ));
    }
    for (field, max) in [
        ("validation.daily_rate_max", limits.daily_rate_max),
        ("validation.daily_per_diem_max", limits.daily_per_diem_max),
        ("validation.rent_monthly_max", limits.rent_monthly_max),
        ("validation.insurance_weekly_max", limits.insurance_weekly_max),
    ] {
        if max < Decimal::ZERO {
            return Err(invalid(field, "must not be negative"));
        }
    }
    if boundary.default_rent_1br > limits.rent_monthly_max {
        return Err(invalid(
            "default_rent_1br",
            "must not exceed validation.rent_monthly_max",
        ));
    }
    if limits.contract_weeks_max == 0 {
        return Err(invalid("validation.contract_weeks_max", "must be at least 1"));
    }
    Ok(())
}
