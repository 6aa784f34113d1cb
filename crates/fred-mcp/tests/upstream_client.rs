// crates/fred-mcp/tests/upstream_client.rs
// ============================================================================
// Module: Upstream Client Tests
// Description: Tests for the FRED upstream client against stub servers.
// Purpose: Validate tagged outcomes, status handling, and size limits.
// Dependencies: fred-mcp, tiny_http
// ============================================================================

//! ## Overview
//! Tests the upstream client boundary: the tagged `Data`/`Missing` outcome,
//! non-success statuses, undecodable bodies, and the response size limit.
//! The stub upstream is reachable in every case, so each test demonstrates
//! that "no data" and "transport failure" remain distinguishable.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use fred_mcp::Fetched;
use fred_mcp::FredClient;
use fred_mcp::UpstreamError;
use fred_mcp_core::SeriesQuery;

use crate::common::TEST_API_KEY;
use crate::common::spawn_server;
use crate::common::stub_client;
use crate::common::stub_upstream_config;

// ============================================================================
// SECTION: Observations
// ============================================================================

/// A present observations key yields the raw records.
#[test]
fn fetch_observations_returns_raw_records() {
    let (url, handle) = spawn_server(
        r#"{"observations":[{"date":"2024-01-01","value":"5.25"},{"date":"2024-02-01","value":"."}]}"#,
        200,
    );
    let client = stub_client(&url);
    let fetched =
        client.fetch_observations(&SeriesQuery::new("FEDFUNDS"), TEST_API_KEY).unwrap();
    handle.join().unwrap();

    let Fetched::Data(records) = fetched else {
        panic!("expected data outcome");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2024-01-01");
    assert_eq!(records[0].value, "5.25");
    assert_eq!(records[1].value, ".");
}

/// Valid JSON without the observations key is a missing outcome, not an error.
#[test]
fn fetch_observations_distinguishes_missing_key() {
    let (url, handle) = spawn_server(r#"{"error_code":34}"#, 200);
    let client = stub_client(&url);
    let fetched =
        client.fetch_observations(&SeriesQuery::new("FEDFUNDS"), TEST_API_KEY).unwrap();
    handle.join().unwrap();

    assert_eq!(fetched, Fetched::Missing);
}

/// Non-success statuses surface as explicit status errors.
#[test]
fn fetch_observations_surfaces_status_errors() {
    let (url, handle) = spawn_server("boom", 500);
    let client = stub_client(&url);
    let result = client.fetch_observations(&SeriesQuery::new("FEDFUNDS"), TEST_API_KEY);
    handle.join().unwrap();

    assert!(matches!(result, Err(UpstreamError::Status(500))));
}

/// Undecodable bodies surface as decode errors.
#[test]
fn fetch_observations_rejects_invalid_json() {
    let (url, handle) = spawn_server("this is not json", 200);
    let client = stub_client(&url);
    let result = client.fetch_observations(&SeriesQuery::new("FEDFUNDS"), TEST_API_KEY);
    handle.join().unwrap();

    assert!(matches!(result, Err(UpstreamError::Decode(_))));
}

/// Bodies over the configured limit are rejected.
#[test]
fn fetch_observations_enforces_response_size_limit() {
    let (url, handle) =
        spawn_server(r#"{"observations":[{"date":"2024-01-01","value":"5.25"}]}"#, 200);
    let mut config = stub_upstream_config(&url);
    config.max_response_bytes = 8;
    let client = FredClient::new(config).unwrap();
    let result = client.fetch_observations(&SeriesQuery::new("FEDFUNDS"), TEST_API_KEY);
    handle.join().unwrap();

    assert!(matches!(result, Err(UpstreamError::ResponseTooLarge)));
}

// ============================================================================
// SECTION: Series Metadata
// ============================================================================

/// The first metadata record is returned when present.
#[test]
fn fetch_metadata_returns_first_record() {
    let (url, handle) = spawn_server(
        r#"{"seriess":[
            {"title":"Federal Funds Effective Rate","units":"Percent"},
            {"title":"Shadow Record"}
        ]}"#,
        200,
    );
    let client = stub_client(&url);
    let fetched = client.fetch_series_metadata("FEDFUNDS", TEST_API_KEY).unwrap();
    handle.join().unwrap();

    let Fetched::Data(metadata) = fetched else {
        panic!("expected data outcome");
    };
    assert_eq!(metadata.title.as_deref(), Some("Federal Funds Effective Rate"));
    assert_eq!(metadata.units.as_deref(), Some("Percent"));
    assert_eq!(metadata.frequency, None);
}

/// An empty metadata array is a missing outcome.
#[test]
fn fetch_metadata_missing_for_empty_array() {
    let (url, handle) = spawn_server(r#"{"seriess":[]}"#, 200);
    let client = stub_client(&url);
    let fetched = client.fetch_series_metadata("NOPE", TEST_API_KEY).unwrap();
    handle.join().unwrap();

    assert_eq!(fetched, Fetched::Missing);
}

/// A body without the seriess key is a missing outcome.
#[test]
fn fetch_metadata_missing_for_absent_key() {
    let (url, handle) = spawn_server(r#"{"error_code":34}"#, 200);
    let client = stub_client(&url);
    let fetched = client.fetch_series_metadata("NOPE", TEST_API_KEY).unwrap();
    handle.join().unwrap();

    assert_eq!(fetched, Fetched::Missing);
}
