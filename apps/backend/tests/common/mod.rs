#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::{test, web, App};
use serde_json::Value;

use bookstore::config::db::{DbKind, DbProfile};
use bookstore::infra::state::build_state;
use bookstore::middleware::request_trace::RequestTrace;
use bookstore::routes;
use bookstore::state::app_state::AppState;
use bookstore::AppError;

// Logging is auto-installed for most test binaries
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Build an AppState backed by a fresh in-memory SQLite store with the
/// schema applied. Every call returns an isolated store.
pub async fn test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory, DbProfile::Test)
        .build()
        .await
}

/// Build an initialized Actix test service with the production routes.
pub async fn test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

/// Validate that a response follows the ProblemDetails structure and that
/// the body trace_id matches the x-trace-id header.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail_contains: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    // Extract headers before consuming the response
    let headers = resp.headers().clone();

    // x-trace-id (header names are case-insensitive; use a typed HeaderName)
    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8")
        .to_string();
    assert!(
        !trace_id.is_empty(),
        "x-trace-id header should not be empty"
    );

    // Content-Type may include parameters (e.g., charset)
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let json: Value = test::read_body_json(resp).await;

    assert_eq!(json["status"].as_u64(), Some(u64::from(expected_status)));
    assert_eq!(json["code"].as_str(), Some(expected_code));

    let detail = json["detail"].as_str().expect("detail should be a string");
    assert!(
        detail.contains(expected_detail_contains),
        "detail '{detail}' should contain '{expected_detail_contains}'"
    );

    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, trace_id,
        "trace_id in body should match x-trace-id header"
    );
}
