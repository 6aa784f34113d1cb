// crates/fred-mcp/src/lib.rs
// ============================================================================
// Module: fred-mcp Server Library
// Description: MCP server and upstream client for FRED series data.
// Purpose: Expose the FRED data pipeline as MCP tools over JSON-RPC 2.0.
// Dependencies: fred-mcp-core, axum, reqwest, tokio
// ============================================================================

//! ## Overview
//! fred-mcp adapts the FRED HTTP API into MCP tools: the upstream client
//! issues one bounded GET per invocation, the core crate cleans and renders
//! the data, and the tool router wraps every outcome as a single text
//! payload. Transports are stdio (framed JSON-RPC) and HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;
pub mod config;
pub mod credential;
pub mod server;
pub mod tools;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ToolCallEvent;
pub use audit::ToolOutcome;
pub use client::ClientError;
pub use client::Fetched;
pub use client::FredClient;
pub use client::UpstreamError;
pub use config::ConfigError;
pub use config::FredMcpConfig;
pub use config::ServerConfig;
pub use config::ServerTransport;
pub use config::UpstreamConfig;
pub use credential::CREDENTIAL_ENV_VAR;
pub use credential::CredentialSource;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::MISSING_CREDENTIAL_TEXT;
pub use tools::ToolRouter;
