// crates/fred-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared test utilities and fixtures for fred-mcp tests.
// Purpose: Provide stub upstream servers and router builders.
// Dependencies: fred-mcp, tiny_http
// ============================================================================

//! ## Overview
//! This module provides loopback stub servers standing in for the upstream
//! API, plus router and client builders wired to them with a fixed test
//! credential.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::thread;

use fred_mcp::CredentialSource;
use fred_mcp::FredClient;
use fred_mcp::NoopAuditSink;
use fred_mcp::ToolRouter;
use fred_mcp::UpstreamConfig;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Credential injected into stub-backed routers.
pub const TEST_API_KEY: &str = "test-key";

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds an upstream config pointing at a loopback stub server.
pub fn stub_upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        allow_http: true,
        ..UpstreamConfig::default()
    }
}

/// Builds a client pointing at a loopback stub server.
pub fn stub_client(base_url: &str) -> FredClient {
    FredClient::new(stub_upstream_config(base_url)).unwrap()
}

/// Builds a router over a loopback stub with a fixed credential.
pub fn stub_router(base_url: &str) -> ToolRouter {
    ToolRouter::new(
        stub_client(base_url),
        CredentialSource::with_key(TEST_API_KEY),
        Arc::new(NoopAuditSink),
    )
}

/// Builds a router with a credential whose upstream is never contacted.
pub fn offline_router_with_key() -> ToolRouter {
    let client = FredClient::new(UpstreamConfig::default()).unwrap();
    ToolRouter::new(client, CredentialSource::with_key(TEST_API_KEY), Arc::new(NoopAuditSink))
}

/// Builds a router whose credential never resolves.
pub fn credentialless_router() -> ToolRouter {
    let client = FredClient::new(UpstreamConfig::default()).unwrap();
    ToolRouter::new(client, CredentialSource::absent(), Arc::new(NoopAuditSink))
}

// ============================================================================
// SECTION: Stub Servers
// ============================================================================

/// Spawns a local test server that responds with the given body and status.
pub fn spawn_server(body: &'static str, status: u16) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (url, handle)
}

/// Spawns a local test server that records the URL of the request it served.
pub fn spawn_recording_server(
    body: &'static str,
    status: u16,
) -> (String, thread::JoinHandle<String>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        let mut served = String::new();
        if let Ok(request) = server.recv() {
            served = request.url().to_string();
            let response = Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
        served
    });

    (url, handle)
}
