//! Integration tests for caredesk-ui API endpoints
//!
//! Tests run against `build_router` with a pre-seeded snapshot cache, so
//! no forms API access happens; one test leaves the cache empty and points
//! the client at an unreachable address to exercise the terminal fetch
//! failure path.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use caredesk_common::config::Config;
use caredesk_ui::cache::RawSnapshot;
use caredesk_ui::kobo::KoboClient;
use caredesk_ui::{build_router, AppState};

fn test_config() -> Config {
    toml::from_str(
        r#"
        [kobo]
        # Unreachable on purpose: tests must never leave the process
        base_url = "http://127.0.0.1:1"
        api_token = "test-token"
        registration_form_id = "aFormA"
        followup_form_id = "aFormB"

        [auth]
        admin_users = ["admin"]
        "#,
    )
    .expect("test config should parse")
}

fn test_state() -> AppState {
    let config = test_config();
    let kobo = KoboClient::new(config.kobo.clone()).expect("client should build");
    AppState::new(Arc::new(config), Arc::new(kobo))
}

/// Test helper: state whose cache already holds a raw snapshot
async fn seeded_state() -> AppState {
    let registrations = vec![
        json!({
            "Registration/S_Num": "C1",
            "Registration/Job_Type": "Repair",
            "Registration/Complaint_Reg_Date": "2025-01-15",
            "Registration/Product_classification": "Fridge",
            "Registration/complaint_channel": "Phone Call",
            "Registration/Customer_name": "Asad",
        }),
        json!({
            "Registration/S_Num": "C2",
            "Registration/Job_Type": "Installation",
            "Registration/Complaint_Reg_Date": "2025-02-03",
            "Registration/complaint_channel": "Walk In",
        }),
    ];
    let followups = vec![
        json!({
            "C_Registration/C_id_nb": "C2",
            "C_Followup/C_Job_Status": "Resolved_Closed",
            "C_Followup/C_Technician_Did": "Bilal",
            "C_invoice_group/C_Amount": "750",
            "_submission_time": "2025-02-05T10:00:00",
        }),
    ];

    let state = test_state();
    state
        .cache
        .store(Arc::new(RawSnapshot::new(registrations, followups)))
        .await;
    state
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn test_request_as(method: &str, uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-caredesk-user", user)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(test_state());

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "caredesk-ui");
    assert!(body["version"].is_string());
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_unfiltered() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/dashboard"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["kpis"]["total_complaints"], 2);
    assert_eq!(body["kpis"]["resolved"], 1);
    assert_eq!(body["kpis"]["not_visited"], 1);
    assert_eq!(body["kpis"]["revenue"], 750.0);
    assert_eq!(body["row_count"], 2);
    assert_eq!(body["filters_applied"], false);
    assert!(body["trend"].is_array());
    assert_eq!(body["trend"][0]["period"], "2025-01");
    assert_eq!(body["trend"][0]["label"], "Jan-25");
}

#[tokio::test]
async fn test_dashboard_filtered_by_period() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/dashboard?periods=2025-02"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["row_count"], 1);
    assert_eq!(body["filters_applied"], true);
    assert_eq!(body["kpis"]["resolved"], 1);
    assert_eq!(body["kpis"]["not_visited"], 0);
}

#[tokio::test]
async fn test_dashboard_empty_filter_result_is_ok_not_error() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/dashboard?years=1999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["row_count"], 0);
    assert_eq!(body["filters_applied"], true);
    assert_eq!(body["kpis"]["total_complaints"], 0);
}

#[tokio::test]
async fn test_dashboard_fetch_failure_is_terminal_502() {
    // Empty cache + unreachable forms API: the render cycle fails whole
    let app = build_router(test_state());

    let response = app
        .oneshot(test_request("GET", "/api/dashboard"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Data fetch failed"));
}

// =============================================================================
// Identity pre-constraint
// =============================================================================

#[tokio::test]
async fn test_technician_identity_constrains_dashboard() {
    let app = build_router(seeded_state().await);

    // Bilal is not in admin_users: only Bilal's complaint is visible
    let response = app
        .oneshot(test_request_as("GET", "/api/dashboard", "Bilal"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["row_count"], 1);
    assert_eq!(body["kpis"]["resolved"], 1);
}

#[tokio::test]
async fn test_admin_identity_sees_everything() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request_as("GET", "/api/dashboard", "admin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["row_count"], 2);
}

// =============================================================================
// Options
// =============================================================================

#[tokio::test]
async fn test_options_lists_periods_sorted_by_key() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/options"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["years"], json!([2025]));
    assert_eq!(body["periods"][0]["period"], "2025-01");
    assert_eq!(body["periods"][0]["label"], "Jan-25");
    assert_eq!(body["periods"][1]["period"], "2025-02");

    let technicians = body["technicians"].as_array().unwrap();
    assert!(technicians.contains(&json!("Bilal")));
    assert!(technicians.contains(&json!("Not Assigned")));
}

// =============================================================================
// Unresolved table + CSV export
// =============================================================================

#[tokio::test]
async fn test_unresolved_lists_only_not_visited_rows() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/unresolved"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["s_num"], "C1");
    assert_eq!(rows[0]["job_status"], "Not Visited Yet");
}

#[tokio::test]
async fn test_unresolved_csv_download() {
    let app = build_router(seeded_state().await);

    let response = app
        .oneshot(test_request("GET", "/api/unresolved.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let text = extract_text(response.into_body()).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Complaint ID,Job Type,Registration Date,Customer Name,Address,Mobile Number,Product,Issue History"
    );
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("C1,Repair,15-01-2025,Asad"));
}

// =============================================================================
// Refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_invalidates_cache() {
    let state = seeded_state().await;
    let app = build_router(state.clone());

    let response = app
        .oneshot(test_request("POST", "/api/refresh"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert!(state.cache.get().await.is_none());
}
