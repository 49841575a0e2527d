//! Request types for the stipend engine API.
//!
//! This module defines the JSON request structure for the `/v1/financials`
//! endpoint and the boundary checks applied before the engine runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::gsa_fiscal_year;
use crate::config::{BoundaryConfig, ContractPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BundledOffer, ConstructionInput, FinancialsInput, InsurancePlan, InsuranceRequest, Offer,
    RateInputs,
};

/// Rent source label when the caller omits a local benchmark.
pub const NATIONAL_DEFAULT_RENT_SOURCE: &str = "national_default";

/// Request body for the `/v1/financials` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialsRequest {
    /// The pay offer.
    pub offer: OfferRequest,
    /// Daily per diem rates for the locality.
    pub rates: RatesRequest,
    /// Local one-bedroom rent; the configured default applies when absent.
    #[serde(default)]
    pub hud_fmr_1br: Option<Decimal>,
    /// Worker specialty.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Contract length in weeks.
    #[serde(default)]
    pub contract_weeks: Option<u32>,
    /// Staffing agency name as typed by the worker.
    #[serde(default)]
    pub agency_name: Option<String>,
    /// Insurance plan tier.
    #[serde(default)]
    pub insurance_plan: InsurancePlan,
    /// Known weekly premium.
    #[serde(default)]
    pub insurance_weekly_override: Option<Decimal>,
}

/// Offer section of a request, tagged by `mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OfferRequest {
    /// Bundled weekly gross.
    Bundled {
        /// Weekly gross offered.
        weekly_gross: Decimal,
        /// Hours per week; the configured default applies when absent.
        #[serde(default)]
        hours: Option<Decimal>,
    },
    /// Hourly wage plus daily per diem.
    Construction(ConstructionInput),
}

/// Rates section of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesRequest {
    /// Daily lodging rate.
    pub lodging_daily: Decimal,
    /// Daily M&IE rate.
    pub meals_daily: Decimal,
    /// GSA fiscal year; derived from today's date when absent.
    #[serde(default)]
    pub fiscal_year: Option<i32>,
}

/// A request that passed validation, with defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// Engine input.
    pub input: FinancialsInput,
    /// Where the rent benchmark came from.
    pub hud_rent_source: String,
    /// Defaults the caller relied on, for the response metadata.
    pub defaults_applied: Vec<String>,
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.into(),
    }
}

fn require_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> EngineResult<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

impl FinancialsRequest {
    /// Validates the request and resolves it into engine input.
    ///
    /// `today` supplies the fiscal year when the caller omits it.
    pub fn resolve(
        self,
        boundary: &BoundaryConfig,
        contract: &ContractPolicy,
        today: NaiveDate,
    ) -> EngineResult<ResolvedRequest> {
        let limits = &boundary.validation;
        let mut defaults_applied = Vec::new();

        require_range(
            "rates.lodging_daily",
            self.rates.lodging_daily,
            Decimal::ZERO,
            limits.daily_rate_max,
        )?;
        require_range(
            "rates.meals_daily",
            self.rates.meals_daily,
            Decimal::ZERO,
            limits.daily_rate_max,
        )?;

        let offer = match self.offer {
            OfferRequest::Bundled {
                weekly_gross,
                hours,
            } => {
                require_range(
                    "offer.weekly_gross",
                    weekly_gross,
                    limits.gross_weekly_min,
                    limits.gross_weekly_max,
                )?;
                let hours = match hours {
                    Some(hours) => hours,
                    None => {
                        defaults_applied.push(format!(
                            "Hours per week defaulted to {}",
                            boundary.default_hours.normalize()
                        ));
                        boundary.default_hours
                    }
                };
                require_range("offer.hours", hours, limits.hours_min, limits.hours_max)?;
                Offer::Bundled(BundledOffer {
                    weekly_gross,
                    hours,
                })
            }
            OfferRequest::Construction(input) => {
                require_range(
                    "offer.hourly_rate",
                    input.hourly_rate,
                    limits.hourly_rate_min,
                    limits.hourly_rate_max,
                )?;
                require_range(
                    "offer.daily_per_diem",
                    input.daily_per_diem,
                    Decimal::ZERO,
                    limits.daily_per_diem_max,
                )?;
                if !(5..=7).contains(&input.per_diem_days) {
                    return Err(invalid(
                        "offer.per_diem_days",
                        format!("must be 5, 6 or 7, got {}", input.per_diem_days),
                    ));
                }
                if let Some(hours) = input.custom_hours {
                    require_range(
                        "offer.custom_hours",
                        hours,
                        limits.hours_min,
                        limits.hours_max,
                    )?;
                }
                Offer::Construction(input)
            }
        };

        let hud_fmr_1br = self.hud_fmr_1br.unwrap_or(boundary.default_rent_1br);
        require_range(
            "hud_fmr_1br",
            hud_fmr_1br,
            Decimal::ZERO,
            limits.rent_monthly_max,
        )?;

        // Negative overrides are ignored downstream, so only the ceiling is checked.
        if let Some(premium) = self.insurance_weekly_override {
            if premium > limits.insurance_weekly_max {
                return Err(invalid(
                    "insurance_weekly_override",
                    format!(
                        "must not exceed {}, got {}",
                        limits.insurance_weekly_max, premium
                    ),
                ));
            }
        }

        let fiscal_year = match self.rates.fiscal_year {
            Some(year) => year,
            None => {
                let year = gsa_fiscal_year(today);
                defaults_applied.push(format!("GSA fiscal year derived from date: FY{}", year));
                year
            }
        };

        let hud_rent_source = match self.hud_fmr_1br {
            Some(_) => format!("HUD FY{}", fiscal_year),
            None => {
                defaults_applied.push(format!(
                    "One-bedroom rent defaulted to {} per month",
                    boundary.default_rent_1br.normalize()
                ));
                NATIONAL_DEFAULT_RENT_SOURCE.to_string()
            }
        };

        if let Some(weeks) = self.contract_weeks {
            if weeks == 0 || weeks > limits.contract_weeks_max {
                return Err(invalid(
                    "contract_weeks",
                    format!(
                        "must be between 1 and {}, got {}",
                        limits.contract_weeks_max, weeks
                    ),
                ));
            }
        } else {
            defaults_applied.push(format!(
                "Contract length defaulted to {} weeks",
                contract.default_weeks
            ));
        }

        Ok(ResolvedRequest {
            input: FinancialsInput {
                offer,
                rates: RateInputs {
                    lodging_daily: self.rates.lodging_daily,
                    meals_daily: self.rates.meals_daily,
                    fiscal_year,
                },
                hud_fmr_1br,
                contract_weeks: self.contract_weeks,
                specialty: self.specialty,
                insurance: InsuranceRequest {
                    agency_name: self.agency_name,
                    plan: self.insurance_plan,
                    weekly_override: self.insurance_weekly_override,
                },
            },
            hud_rent_source,
            defaults_applied,
        })
    }
}
