//! Taxable wage floor by specialty.
//!
//! Specialties whose BLS entry requires a bachelor's degree or higher sit in
//! Tier A with a higher hourly floor. A taxable hourly rate below the floor
//! is a common audit trigger for stipend-heavy offers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const TIER_A_ROLES: &[&str] = &[
    "PT", "DPT", "OT", "SLP", "MLS", "CRNA", "NP", "APRN", "PHARMD", "LCSW", "RD", "DIETITIAN",
    "AUD", "BSN",
];

// Assistant roles contain a Tier A role as a substring.
const TIER_B_EXCLUSIONS: &[&str] = &["PTA", "OTA"];

/// Education tier of a specialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialtyTier {
    /// Bachelor's degree or higher.
    TierA,
    /// Associate degree or certificate.
    TierB,
}

impl SpecialtyTier {
    /// Classifies a free-form specialty string.
    ///
    /// Matching is a case-insensitive substring test, so "ICU RN, BSN" is
    /// Tier A while "PTA" is not.
    ///
    /// # Examples
    ///
    /// ```
    /// use stipend_engine::calculation::SpecialtyTier;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(SpecialtyTier::for_specialty("Travel PT"), SpecialtyTier::TierA);
    /// assert_eq!(SpecialtyTier::for_specialty("PTA").floor(), Decimal::from(15));
    /// ```
    pub fn for_specialty(specialty: &str) -> Self {
        let upper = specialty.to_uppercase();
        let tier_a = TIER_A_ROLES.iter().any(|role| upper.contains(role))
            && !TIER_B_EXCLUSIONS.iter().any(|role| upper.contains(role));

        if tier_a {
            SpecialtyTier::TierA
        } else {
            SpecialtyTier::TierB
        }
    }

    /// Minimum defensible taxable hourly rate for the tier.
    pub fn floor(&self) -> Decimal {
        match self {
            SpecialtyTier::TierA => Decimal::from(20),
            SpecialtyTier::TierB => Decimal::from(15),
        }
    }

    /// Short description of the tier's education requirement.
    pub fn description(&self) -> &'static str {
        match self {
            SpecialtyTier::TierA => "Tier A (Bachelor's degree or higher BLS requirement)",
            SpecialtyTier::TierB => "Tier B (Associate degree or certificate BLS requirement)",
        }
    }
}
