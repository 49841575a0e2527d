//! Core data models for the stipend engine.
//!
//! Every model is a plain value computed once per request and discarded.

mod audit;
mod breakdown;
mod construction;
mod financials;
mod insurance;
mod rates;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use breakdown::{BundledOffer, PayBreakdown};
pub use construction::{
    ConstructionBreakdown, ConstructionInput, ConstructionSchedule, DEFAULT_SCHEDULE_HOURS,
    HousingModel,
};
pub use financials::{
    ComparisonBasisKind, ContractProjection, FinancialsInput, FinancialsResult, HousingData,
    NegotiationBands, Offer, OfferLabel, OfferMode, OfferVerdict,
};
pub use insurance::{InsuranceEstimate, InsurancePlan, InsuranceRequest, InsuranceSourceType};
pub use rates::{GsaTotals, RateInputs};
