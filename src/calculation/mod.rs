//! Derivations for the stipend engine.
//!
//! One file per derivation: GSA ceiling totals, the bundled pay breakdown,
//! construction pay with weekly overtime and its normalisation, the
//! comparison basis, housing surplus, negotiation bands, insurance
//! estimates, the offer verdict and the contract projection. The
//! [`derive_financials`] pipeline composes them in order.
//!
//! Every derivation is a pure function returning its value together with
//! an [`AuditStep`](crate::models::AuditStep).

mod comparison_basis;
mod construction_pay;
mod contract_projection;
mod fiscal_year;
mod gsa_totals;
mod housing_surplus;
mod insurance_estimate;
mod negotiation_bands;
mod offer_verdict;
mod pay_breakdown;
mod pipeline;
mod rounding;
mod specialty_tier;

pub use comparison_basis::{ComparisonBasisResult, gsa_comparison_weekly};
pub use construction_pay::{
    ConstructionPayResult, compute_construction_pay, normalize_construction, schedule_hours,
};
pub use contract_projection::{
    ContractProjectionResult, DEFAULT_CONTRACT_WEEKS, derive_contract_projection,
};
pub use fiscal_year::gsa_fiscal_year;
pub use gsa_totals::{DAYS_PER_MONTH, DAYS_PER_WEEK, GsaTotalsResult, derive_gsa_totals};
pub use housing_surplus::{HousingDataResult, derive_housing_data};
pub use insurance_estimate::{
    AgencyInsurance, InsuranceEstimateResult, agency_insurance, estimate_insurance_weekly,
    normalize_agency_key,
};
pub use negotiation_bands::{NegotiationBandsResult, derive_negotiation_bands};
pub use offer_verdict::{OfferVerdictResult, derive_offer_verdict};
pub use pay_breakdown::{PayBreakdownResult, derive_pay_breakdown};
pub use pipeline::derive_financials;
pub use rounding::{round_cents, round_whole};
pub use specialty_tier::SpecialtyTier;
