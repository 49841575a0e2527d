//! Integration tests for the stipend engine HTTP API.
//!
//! Covers:
//! - Bundled offers above and below the ceiling
//! - Construction offers with self-sourced and company housing
//! - Boundary defaults (hours, fiscal year, rent)
//! - Insurance estimates and net after insurance
//! - Validation and malformed input errors

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use stipend_engine::api::{AppState, FinancialsResponse, create_router};
use stipend_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a JSON number as a decimal.
fn decimal_at(value: &Value) -> Decimal {
    assert!(value.is_number(), "Expected a number, got {}", value);
    Decimal::from_str(&value.to_string()).unwrap()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = decimal_at(value);
    assert_eq!(
        actual.normalize(),
        decimal(expected).normalize(),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn post_financials(router: Router, body: Value) -> (StatusCode, Value) {
    post_raw(router, body.to_string()).await
}

async fn post_raw(router: Router, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/financials")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn bundled_request(weekly_gross: f64, hours: f64) -> Value {
    json!({
        "offer": {"mode": "bundled", "weekly_gross": weekly_gross, "hours": hours},
        "rates": {"lodging_daily": 156, "meals_daily": 86, "fiscal_year": 2026},
        "hud_fmr_1br": 2140
    })
}

fn construction_request(housing_model: &str) -> Value {
    json!({
        "offer": {
            "mode": "construction",
            "hourly_rate": 35,
            "schedule": "5x10",
            "daily_per_diem": 120,
            "per_diem_days": 7,
            "housing_model": housing_model
        },
        "rates": {"lodging_daily": 156, "meals_daily": 68, "fiscal_year": 2026},
        "hud_fmr_1br": 1800,
        "contract_weeks": 13
    })
}

// =============================================================================
// SECTION 1: Bundled offers
// =============================================================================

#[tokio::test]
async fn test_bundled_above_ceiling() {
    let (status, result) = post_financials(create_router_for_test(), bundled_request(2500.0, 36.0)).await;

    assert_eq!(status, StatusCode::OK);
    let financials = &result["financials"];
    assert_eq!(financials["mode"], "bundled");

    assert_decimal(&financials["gsa"]["weekly_max"], "1694");
    assert_decimal(&financials["gsa"]["monthly_max"], "7260");

    let breakdown = &financials["breakdown"];
    assert_decimal(&breakdown["stipend_weekly"], "1694");
    assert_decimal(&breakdown["taxable_weekly"], "806");
    assert_decimal(&breakdown["taxable_hourly"], "22.39");
    assert_decimal(&breakdown["tax_estimate_weekly"], "161.2");
    assert_decimal(&breakdown["net_weekly"], "2338.8");

    let negotiation = &financials["negotiation"];
    assert_decimal(&negotiation["pct_70"], "1186");
    assert_decimal(&negotiation["pct_80"], "1355");
    assert_decimal(&negotiation["pct_95"], "1609");
    assert_decimal(&negotiation["pct_100"], "1694");
    assert_decimal(&negotiation["pct_of_max"], "100");

    let contract = &financials["contract"];
    assert_eq!(contract["weeks"], 13);
    assert_decimal(&contract["gross"], "32500");
    assert_decimal(&contract["tax_free_total"], "22022");
    assert_decimal(&contract["net_estimate"], "30404");

    assert_decimal(&financials["housing"]["stipend_monthly_est"], "7260");
    assert_decimal(&financials["housing"]["stipend_surplus_monthly"], "5120");
    assert_eq!(financials["verdict"]["label"], "top");
    assert!(financials["construction"].is_null());
}

#[tokio::test]
async fn test_bundled_below_ceiling_is_all_stipend() {
    let request = json!({
        "offer": {"mode": "bundled", "weekly_gross": 1500, "hours": 36},
        "rates": {"lodging_daily": 200, "meals_daily": 80, "fiscal_year": 2026},
        "hud_fmr_1br": 2000
    });

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &result["financials"]["breakdown"];
    assert_decimal(&result["financials"]["gsa"]["weekly_max"], "1960");
    assert_decimal(&breakdown["stipend_weekly"], "1500");
    assert_decimal(&breakdown["taxable_weekly"], "0");
    assert_decimal(&breakdown["tax_estimate_weekly"], "0");
    assert_decimal(&breakdown["net_weekly"], "1500");
}

#[tokio::test]
async fn test_rent_above_ceiling_gives_negative_surplus() {
    let request = json!({
        "offer": {"mode": "bundled", "weekly_gross": 1000, "hours": 36},
        "rates": {"lodging_daily": 100, "meals_daily": 30, "fiscal_year": 2026},
        "hud_fmr_1br": 5000
    });

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["financials"]["housing"]["stipend_surplus_monthly"], "-1100");
}

#[tokio::test]
async fn test_response_envelope_fields() {
    let (status, result) = post_financials(create_router_for_test(), bundled_request(2500.0, 36.0)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["calculation_id"].is_string());
    assert!(result["timestamp"].is_string());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
    assert!(result["duration_us"].is_u64());
    assert_eq!(result["metadata"]["tax_method"], "flat_20pct_estimate");
    assert!(result["metadata"]["assumptions"].as_array().unwrap().len() >= 3);

    let typed: FinancialsResponse = serde_json::from_value(result).unwrap();
    assert_eq!(typed.financials.breakdown.stipend_weekly, decimal("1694"));
}

#[tokio::test]
async fn test_audit_trace_is_sequential() {
    let (_, result) = post_financials(create_router_for_test(), bundled_request(2500.0, 36.0)).await;

    let steps = result["financials"]["audit_trace"]["steps"].as_array().unwrap();
    assert!(!steps.is_empty());
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], index as u64 + 1);
        assert!(step["rule_id"].is_string());
        assert!(step["reasoning"].is_string());
    }
}

#[tokio::test]
async fn test_taxable_floor_warning_for_tier_a_specialty() {
    let mut request = bundled_request(2000.0, 36.0);
    request["specialty"] = json!("Travel PT");

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let warnings = result["financials"]["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "TAXABLE_WAGE_BELOW_FLOOR");
    assert_decimal(&result["financials"]["breakdown"]["stipend_weekly"], "1694");
}

// =============================================================================
// SECTION 2: Boundary defaults
// =============================================================================

#[tokio::test]
async fn test_defaults_applied_when_omitted() {
    let request = json!({
        "offer": {"mode": "bundled", "weekly_gross": 2500},
        "rates": {"lodging_daily": 156, "meals_daily": 86}
    });

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["financials"]["breakdown"]["hours"], "36");
    assert_decimal(&result["financials"]["housing"]["hud_fmr_1br"], "1800");
    assert_eq!(result["metadata"]["hud_rent_source"], "national_default");
    assert!(result["metadata"]["gsa_fiscal_year"].as_i64().unwrap() >= 2026);
}

#[tokio::test]
async fn test_contract_weeks_override() {
    let mut request = bundled_request(2500.0, 36.0);
    request["contract_weeks"] = json!(26);

    let (_, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(result["financials"]["contract"]["weeks"], 26);
    assert_decimal(&result["financials"]["contract"]["gross"], "65000");
}

// =============================================================================
// SECTION 3: Construction offers
// =============================================================================

#[tokio::test]
async fn test_construction_self_sourced_housing() {
    let (status, result) = post_financials(create_router_for_test(), construction_request("self")).await;

    assert_eq!(status, StatusCode::OK);
    let financials = &result["financials"];
    assert_eq!(financials["mode"], "construction");

    let construction = &financials["construction"];
    assert_decimal(&construction["straight_hours"], "40");
    assert_decimal(&construction["ot_hours"], "10");
    assert_decimal(&construction["straight_pay"], "1400");
    assert_decimal(&construction["ot_pay"], "525");
    assert_decimal(&construction["weekly_wage"], "1925");
    assert_decimal(&construction["weekly_per_diem"], "840");
    assert_decimal(&construction["weekly_gross_total"], "2765");

    assert_decimal(&financials["gsa_comparison_weekly"], "1568");
    assert_decimal(&financials["breakdown"]["stipend_weekly"], "840");
    assert_decimal(&financials["breakdown"]["taxable_weekly"], "1925");
    assert_decimal(&financials["breakdown"]["net_weekly"], "2380");
    assert_eq!(financials["verdict"]["gsa_comparison_basis"], "full_per_diem");
}

#[tokio::test]
async fn test_construction_company_housing_uses_meals_only() {
    let (status, result) = post_financials(create_router_for_test(), construction_request("company")).await;

    assert_eq!(status, StatusCode::OK);
    let financials = &result["financials"];
    assert_decimal(&financials["gsa_comparison_weekly"], "476");
    assert_decimal(&financials["breakdown"]["stipend_weekly"], "476");
    assert_decimal(&financials["breakdown"]["taxable_weekly"], "2289");
    assert_decimal(&financials["negotiation"]["pct_of_max"], "176");
    assert_eq!(financials["verdict"]["gsa_comparison_basis"], "meals_only");
}

#[tokio::test]
async fn test_construction_custom_schedule() {
    let mut request = construction_request("self");
    request["offer"]["schedule"] = json!("custom");
    request["offer"]["custom_hours"] = json!(45);

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let construction = &result["financials"]["construction"];
    assert_decimal(&construction["total_hours"], "45");
    assert_decimal(&construction["ot_hours"], "5");
    assert_decimal(&construction["ot_pay"], "262.5");
}

#[tokio::test]
async fn test_construction_unknown_schedule_warns() {
    let mut request = construction_request("self");
    request["offer"]["schedule"] = json!("3x14");

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&result["financials"]["construction"]["total_hours"], "50");
    let warnings = result["financials"]["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings[0]["code"], "UNRECOGNIZED_SCHEDULE");
}

// =============================================================================
// SECTION 4: Insurance
// =============================================================================

#[tokio::test]
async fn test_insurance_from_reference_table() {
    let mut request = bundled_request(2500.0, 36.0);
    request["agency_name"] = json!("Aya Healthcare");
    request["insurance_plan"] = json!("single");

    let (status, result) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let insurance = &result["financials"]["insurance"];
    assert_eq!(insurance["agency_key"], "aya");
    assert_eq!(insurance["source_type"], "reported");
    assert_decimal(&insurance["weekly_mid"], "150");
    assert_decimal(&result["financials"]["net_after_insurance_weekly"], "2188.8");
}

#[tokio::test]
async fn test_insurance_override() {
    let mut request = bundled_request(2500.0, 36.0);
    request["agency_name"] = json!("Hosted Staffing");
    request["insurance_plan"] = json!("family");
    request["insurance_weekly_override"] = json!(88.8);

    let (_, result) = post_financials(create_router_for_test(), request).await;

    let insurance = &result["financials"]["insurance"];
    assert!(insurance["agency_key"].is_null());
    assert_eq!(insurance["agency_label"], "Hosted Staffing");
    assert_decimal(&insurance["weekly_mid"], "88.8");
    assert_eq!(insurance["notes"], "User-provided premium override");
    assert_decimal(&result["financials"]["net_after_insurance_weekly"], "2250");
}

#[tokio::test]
async fn test_insurance_unknown_agency_has_no_estimate() {
    let mut request = bundled_request(2500.0, 36.0);
    request["agency_name"] = json!("Some Local Staffing");
    request["insurance_plan"] = json!("single");

    let (_, result) = post_financials(create_router_for_test(), request).await;

    let insurance = &result["financials"]["insurance"];
    assert!(insurance["weekly_mid"].is_null());
    assert_decimal(&result["financials"]["net_after_insurance_weekly"], "2338.8");
}

// =============================================================================
// SECTION 5: Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json() {
    let (status, error) = post_raw(create_router_for_test(), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_wrong_type_is_malformed() {
    let request = json!({
        "offer": {"mode": "bundled", "weekly_gross": true},
        "rates": {"lodging_daily": 156, "meals_daily": 86}
    });

    let (status, error) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_mode_is_validation_error() {
    let request = json!({
        "offer": {"mode": "salaried", "weekly_gross": 2500},
        "rates": {"lodging_daily": 156, "meals_daily": 86}
    });

    let (status, error) = post_financials(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_validation_errors_name_the_field() {
    let cases = vec![
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 199},
                   "rates": {"lodging_daily": 156, "meals_daily": 86}}),
            "offer.weekly_gross",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500, "hours": 7},
                   "rates": {"lodging_daily": 156, "meals_daily": 86}}),
            "offer.hours",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500},
                   "rates": {"lodging_daily": 156, "meals_daily": -86}}),
            "rates.meals_daily",
        ),
        (
            json!({"offer": {"mode": "construction", "hourly_rate": 5, "schedule": "5x10",
                             "daily_per_diem": 120, "per_diem_days": 7},
                   "rates": {"lodging_daily": 156, "meals_daily": 68}}),
            "offer.hourly_rate",
        ),
        (
            json!({"offer": {"mode": "construction", "hourly_rate": 35, "schedule": "5x10",
                             "daily_per_diem": -1, "per_diem_days": 7},
                   "rates": {"lodging_daily": 156, "meals_daily": 68}}),
            "offer.daily_per_diem",
        ),
        (
            json!({"offer": {"mode": "construction", "hourly_rate": 35, "schedule": "5x10",
                             "daily_per_diem": 120, "per_diem_days": 3},
                   "rates": {"lodging_daily": 156, "meals_daily": 68}}),
            "offer.per_diem_days",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500},
                   "rates": {"lodging_daily": 156, "meals_daily": 86},
                   "contract_weeks": 200}),
            "contract_weeks",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500},
                   "rates": {"lodging_daily": "10000000000000000000000000000", "meals_daily": 86}}),
            "rates.lodging_daily",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500},
                   "rates": {"lodging_daily": 156, "meals_daily": 86},
                   "hud_fmr_1br": 250000}),
            "hud_fmr_1br",
        ),
        (
            json!({"offer": {"mode": "bundled", "weekly_gross": 2500},
                   "rates": {"lodging_daily": 156, "meals_daily": 86},
                   "insurance_weekly_override": 9000}),
            "insurance_weekly_override",
        ),
    ];

    for (request, field) in cases {
        let (status, error) = post_financials(create_router_for_test(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
        assert_eq!(error["code"], "VALIDATION_ERROR", "field {}", field);
        assert_eq!(error["details"], field);
    }
}

#[tokio::test]
async fn test_health() {
    let response = create_router_for_test()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"status": "ok"}));
}
