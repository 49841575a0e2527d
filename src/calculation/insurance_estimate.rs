//! Agency health insurance estimates.
//!
//! Premiums come from a small read-only reference table. A figure is only
//! present when a primary source publishes or reports it; everything else
//! is left empty so callers fall back to a user override.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::rounding::round_cents;
use crate::models::{
    AuditStep, InsuranceEstimate, InsurancePlan, InsuranceRequest, InsuranceSourceType,
};

/// One row of the agency reference table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyInsurance {
    /// Display name.
    pub agency: &'static str,
    /// Provenance of the figures.
    pub source_type: InsuranceSourceType,
    /// Lower individual weekly premium.
    pub individual_weekly_min: Option<Decimal>,
    /// Upper individual weekly premium.
    pub individual_weekly_max: Option<Decimal>,
    /// Lower family weekly premium.
    pub family_weekly_min: Option<Decimal>,
    /// Upper family weekly premium.
    pub family_weekly_max: Option<Decimal>,
    /// Coverage starts on the first day of the assignment.
    pub day_one: bool,
    /// Days of coverage kept between assignments.
    pub gap_coverage_days: Option<u32>,
    /// Context shown next to the estimate.
    pub notes: &'static str,
    /// Primary sources.
    pub source_urls: &'static [&'static str],
    /// Date the row was last checked against its sources.
    pub last_verified: &'static str,
}

impl AgencyInsurance {
    fn bounds(&self, plan: InsurancePlan) -> (Option<Decimal>, Option<Decimal>) {
        if plan.is_family() {
            (self.family_weekly_min, self.family_weekly_max)
        } else {
            (self.individual_weekly_min, self.individual_weekly_max)
        }
    }
}

const LAST_VERIFIED: &str = "2026-02-24";

static AGENCY_INSURANCE: Lazy<BTreeMap<&'static str, AgencyInsurance>> = Lazy::new(|| {
    let mut table = BTreeMap::new();
    table.insert(
        "aya",
        AgencyInsurance {
            agency: "Aya Healthcare",
            source_type: InsuranceSourceType::Reported,
            individual_weekly_min: Some(Decimal::from(100)),
            individual_weekly_max: Some(Decimal::from(200)),
            family_weekly_min: None,
            family_weekly_max: None,
            day_one: true,
            gap_coverage_days: None,
            notes: "Aya does not publish premiums. Pay-range spread reflects taking vs waiving \
                    insurance. Nurse blogs report ~$200/wk individual.",
            source_urls: &[
                "https://travelingwithjuls.com/health-insurance-for-travel-nurses/",
                "https://www.ayahealthcare.com/allied-professionals/pay-and-benefits/",
            ],
            last_verified: LAST_VERIFIED,
        },
    );
    table.insert(
        "trusted",
        AgencyInsurance {
            agency: "Trusted Health",
            source_type: InsuranceSourceType::Published,
            individual_weekly_min: Some(Decimal::from(167)),
            individual_weekly_max: None,
            family_weekly_min: None,
            family_weekly_max: None,
            day_one: true,
            gap_coverage_days: Some(28),
            notes: "Trusted publishes individual starting cost ($167/wk). Dependent pricing not \
                    published. 28-day benefit rollover between assignments.",
            source_urls: &[
                "https://www.trustedhealth.com/faqs",
                "https://www.trustedhealth.com/how-it-works",
            ],
            last_verified: LAST_VERIFIED,
        },
    );
    table.insert(
        "host",
        AgencyInsurance {
            agency: "Host Healthcare",
            source_type: InsuranceSourceType::Published,
            individual_weekly_min: None,
            individual_weekly_max: None,
            family_weekly_min: None,
            family_weekly_max: None,
            day_one: true,
            gap_coverage_days: Some(30),
            notes: "Host publishes benefits continuity for gaps <30 days. Premiums not published.",
            source_urls: &["https://www.hosthealthcare.com/for-travelers/travel-nursing/benefits/"],
            last_verified: LAST_VERIFIED,
        },
    );
    table.insert(
        "tnaa",
        AgencyInsurance {
            agency: "TNAA",
            source_type: InsuranceSourceType::Published,
            individual_weekly_min: None,
            individual_weekly_max: None,
            family_weekly_min: None,
            family_weekly_max: None,
            day_one: true,
            gap_coverage_days: None,
            notes: "Day-one coverage with plan tiers (HDHP/HSA, PPO Base, PPO Buy-Up). Premiums \
                    not published.",
            source_urls: &[
                "https://tnaa.com/benefits",
                "https://tnaa.com/blog/allied-health-and-travel-nurse-insurance",
            ],
            last_verified: LAST_VERIFIED,
        },
    );
    table.insert(
        "medical_solutions",
        AgencyInsurance {
            agency: "Medical Solutions",
            source_type: InsuranceSourceType::Historical,
            individual_weekly_min: Some(Decimal::from(15)),
            individual_weekly_max: None,
            family_weekly_min: None,
            family_weekly_max: None,
            day_one: true,
            gap_coverage_days: None,
            notes: "Published $15/wk starting April 2015. Historical structure only; treat as \
                    stale for current pricing.",
            source_urls: &[
                "https://www.medicalsolutions.com/blog/clinician/traveler-tips/benefits-and-pay/travel-nurse-insurance/",
            ],
            last_verified: LAST_VERIFIED,
        },
    );
    table
});

// Checked in order; the first match wins.
static ALIASES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("aya", r"(?i)\baya\b"),
        ("trusted", r"(?i)\btrusted\b"),
        ("host", r"(?i)\bhost\b"),
        ("tnaa", r"(?i)\btnaa\b|\btravel\s*nurse\s*across\s*america\b"),
        ("medical_solutions", r"(?i)\bmedical\s*solutions\b|\baureus\b"),
    ]
    .into_iter()
    .map(|(key, pattern)| (key, Regex::new(pattern).expect("valid agency alias pattern")))
    .collect()
});

/// Looks up a row of the agency reference table by normalized key.
pub fn agency_insurance(key: &str) -> Option<&'static AgencyInsurance> {
    AGENCY_INSURANCE.get(key)
}

/// Maps a free-form agency name to a reference table key.
///
/// Matching is case-insensitive and on whole words only.
///
/// # Examples
///
/// ```
/// use stipend_engine::calculation::normalize_agency_key;
///
/// assert_eq!(normalize_agency_key("Host Healthcare").as_deref(), Some("host"));
/// assert_eq!(normalize_agency_key("Hosted Staffing"), None);
/// assert_eq!(normalize_agency_key("  "), None);
/// ```
pub fn normalize_agency_key(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .find(|(_, pattern)| pattern.is_match(name))
        .map(|(key, _)| key.to_string())
}

/// The result of estimating an insurance premium, including the audit step.
#[derive(Debug, Clone)]
pub struct InsuranceEstimateResult {
    /// The premium estimate.
    pub estimate: InsuranceEstimate,
    /// The audit step recording how the estimate was resolved.
    pub audit_step: AuditStep,
}

/// Estimates the weekly premium for a plan at an agency.
///
/// Resolution order:
///
/// 1. plan `none` - all figures zero
/// 2. a non-negative override - used as min, max and midpoint
/// 3. a recognized agency - the table row for the plan tier
/// 4. otherwise - no figures
///
/// A negative override is ignored.
pub fn estimate_insurance_weekly(
    request: &InsuranceRequest,
    step_number: u32,
) -> InsuranceEstimateResult {
    let (estimate, reasoning) = resolve(request);

    let audit_step = AuditStep {
        step_number,
        rule_id: "insurance_estimate".to_string(),
        rule_name: "Insurance Estimate".to_string(),
        reference: format!("Agency insurance reference table ({})", LAST_VERIFIED),
        input: serde_json::json!({
            "agency_name": request.agency_name,
            "plan": request.plan,
            "weekly_override": request.weekly_override.map(|v| v.normalize().to_string())
        }),
        output: serde_json::json!({
            "agency_key": estimate.agency_key,
            "weekly_min": estimate.weekly_min.map(|v| v.normalize().to_string()),
            "weekly_max": estimate.weekly_max.map(|v| v.normalize().to_string()),
            "weekly_mid": estimate.weekly_mid.map(|v| v.normalize().to_string()),
            "source_type": estimate.source_type
        }),
        reasoning,
    };

    InsuranceEstimateResult {
        estimate,
        audit_step,
    }
}

fn resolve(request: &InsuranceRequest) -> (InsuranceEstimate, String) {
    let plan = request.plan;

    if plan == InsurancePlan::None {
        return (
            InsuranceEstimate {
                plan,
                agency_key: None,
                agency_label: None,
                weekly_min: Some(Decimal::ZERO),
                weekly_max: Some(Decimal::ZERO),
                weekly_mid: Some(Decimal::ZERO),
                source_type: InsuranceSourceType::Unknown,
                source_urls: Vec::new(),
                notes: None,
            },
            "No insurance plan selected".to_string(),
        );
    }

    let agency_key = request.agency_name.as_deref().and_then(normalize_agency_key);
    let row = agency_key.as_deref().and_then(agency_insurance);

    let override_weekly = request
        .weekly_override
        .filter(|value| *value >= Decimal::ZERO)
        .map(round_cents);

    if let Some(premium) = override_weekly {
        return (
            InsuranceEstimate {
                plan,
                agency_label: row
                    .map(|r| r.agency.to_string())
                    .or_else(|| request.agency_name.clone()),
                agency_key,
                weekly_min: Some(premium),
                weekly_max: Some(premium),
                weekly_mid: Some(premium),
                source_type: InsuranceSourceType::Unknown,
                source_urls: Vec::new(),
                notes: Some("User-provided premium override".to_string()),
            },
            format!("User-provided premium ${} per week", premium.normalize()),
        );
    }

    let Some(row) = row else {
        return (
            InsuranceEstimate {
                plan,
                agency_key: None,
                agency_label: request.agency_name.clone(),
                weekly_min: None,
                weekly_max: None,
                weekly_mid: None,
                source_type: InsuranceSourceType::Unknown,
                source_urls: Vec::new(),
                notes: Some("No estimate available for this agency".to_string()),
            },
            "Agency not recognized; no premium estimate".to_string(),
        );
    };

    let (weekly_min, weekly_max) = row.bounds(plan);
    let weekly_mid = match (weekly_min, weekly_max) {
        (Some(min), Some(max)) => Some(round_cents((min + max) / Decimal::from(2))),
        (Some(bound), None) | (None, Some(bound)) => Some(bound),
        (None, None) => None,
    };

    let reasoning = match weekly_mid {
        Some(mid) => format!("{} premium midpoint ${} per week", row.agency, mid.normalize()),
        None => format!("{} does not publish premiums for this plan", row.agency),
    };

    (
        InsuranceEstimate {
            plan,
            agency_key,
            agency_label: Some(row.agency.to_string()),
            weekly_min,
            weekly_max,
            weekly_mid,
            source_type: row.source_type,
            source_urls: row.source_urls.iter().map(|url| url.to_string()).collect(),
            notes: Some(row.notes.to_string()),
        },
        reasoning,
    )
}
