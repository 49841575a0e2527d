//! HTTP API module for the stipend engine.
//!
//! This module provides the request boundary: input validation, boundary
//! defaults (hours, fiscal year, rent) and the response envelope around
//! [`derive_financials`](crate::calculation::derive_financials).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    FinancialsRequest, NATIONAL_DEFAULT_RENT_SOURCE, OfferRequest, RatesRequest, ResolvedRequest,
};
pub use response::{ApiError, FinancialsResponse, HealthResponse, ResponseMetadata};
pub use state::AppState;
