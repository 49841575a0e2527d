//! HTTP request handlers for the stipend engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::derive_financials;
use crate::config::PolicyConfig;

use super::request::FinancialsRequest;
use super::response::{
    ApiError, ApiErrorResponse, FinancialsResponse, HealthResponse, ResponseMetadata,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/financials", post(financials_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn error_response(api_error: ApiErrorResponse) -> axum::response::Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /v1/financials.
///
/// Validates the request, applies boundary defaults and returns the derived
/// figures in the response envelope.
async fn financials_handler(
    State(state): State<AppState>,
    payload: Result<Json<FinancialsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing financials request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") || body_text.contains("unknown variant")
                    {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config();
    let today = Utc::now().date_naive();
    let resolved = match request.resolve(config.boundary(), &config.policy().contract, today) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request validation failed"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let financials = derive_financials(&resolved.input, config.policy());
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        mode = ?financials.mode,
        fiscal_year = financials.gsa.fiscal_year,
        stipend_weekly = %financials.breakdown.stipend_weekly,
        net_weekly = %financials.breakdown.net_weekly,
        warnings = financials.audit_trace.warnings.len(),
        duration_us,
        "Financials derived successfully"
    );

    let metadata = ResponseMetadata {
        gsa_fiscal_year: financials.gsa.fiscal_year,
        hud_rent_source: resolved.hud_rent_source,
        tax_method: tax_method(config.policy()),
        assumptions: assumptions(config.policy(), resolved.defaults_applied),
    };

    let response = FinancialsResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        financials,
        metadata,
        duration_us,
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

fn tax_percent(policy: &PolicyConfig) -> Decimal {
    (policy.tax.flat_rate_estimate * Decimal::ONE_HUNDRED).normalize()
}

/// Label for the flat-rate tax approximation, e.g. `flat_20pct_estimate`.
fn tax_method(policy: &PolicyConfig) -> String {
    format!("flat_{}pct_estimate", tax_percent(policy))
}

fn assumptions(policy: &PolicyConfig, defaults_applied: Vec<String>) -> Vec<String> {
    let mut assumptions = vec![
        format!(
            "Tax estimated at a flat {}% of taxable wages",
            tax_percent(policy)
        ),
        "Monthly figures use a 30-day month".to_string(),
        format!(
            "Hourly offers pay {}x beyond {} hours per week",
            policy.overtime.multiplier.normalize(),
            policy.overtime.weekly_threshold_hours.normalize()
        ),
    ];
    assumptions.extend(defaults_applied);
    assumptions
}
