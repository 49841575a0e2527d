//! Health insurance estimate models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The insurance plan a worker intends to take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsurancePlan {
    /// No coverage through the offer, or coverage waived.
    #[default]
    None,
    /// Individual agency coverage.
    Single,
    /// Family agency coverage.
    Family,
    /// Marketplace (ACA) coverage.
    Aca,
    /// Privately purchased coverage.
    Private,
    /// Union-provided coverage.
    Union,
}

impl InsurancePlan {
    /// Returns true for the plan tier priced from family columns.
    pub fn is_family(&self) -> bool {
        matches!(self, InsurancePlan::Family)
    }
}

/// How trustworthy a premium figure is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceSourceType {
    /// Published by the agency itself.
    Published,
    /// Reported by workers.
    Reported,
    /// Published once but stale.
    Historical,
    /// No source, or supplied by the user.
    #[default]
    Unknown,
}

/// The insurance part of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRequest {
    /// Free-form agency name as typed by the worker.
    #[serde(default)]
    pub agency_name: Option<String>,
    /// Requested plan tier.
    #[serde(default)]
    pub plan: InsurancePlan,
    /// Explicit weekly premium; wins over reference data when non-negative.
    #[serde(default)]
    pub weekly_override: Option<Decimal>,
}

/// A weekly premium estimate.
///
/// Pricing fields are `None` when no estimate exists; that is a valid
/// result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceEstimate {
    /// The plan that was priced.
    pub plan: InsurancePlan,
    /// Normalized agency key, if the name was recognized.
    pub agency_key: Option<String>,
    /// Display name of the agency.
    pub agency_label: Option<String>,
    /// Lower weekly premium bound.
    pub weekly_min: Option<Decimal>,
    /// Upper weekly premium bound.
    pub weekly_max: Option<Decimal>,
    /// Midpoint used for net-after-insurance figures.
    pub weekly_mid: Option<Decimal>,
    /// Provenance of the figures.
    pub source_type: InsuranceSourceType,
    /// Where the figures came from.
    pub source_urls: Vec<String>,
    /// Explanation shown next to the estimate.
    pub notes: Option<String>,
}
