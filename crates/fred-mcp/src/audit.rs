// crates/fred-mcp/src/audit.rs
// ============================================================================
// Module: Tool Call Audit Logging
// Description: Structured audit events for MCP tool invocations.
// Purpose: Emit per-call outcome logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every tool invocation emits one audit event with its outcome label and,
//! when a fetch ran, the number of records dropped by the cleaning policy.
//! The silent per-record drop is deliberate; the counter keeps it observable
//! here without changing the rendered result. Sinks are intentionally
//! lightweight so deployments can route events to their preferred logging
//! pipeline without redesign.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Outcome Labels
// ============================================================================

/// Outcome classification for one tool invocation.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Tool produced a data-bearing result.
    Ok,
    /// Upstream reachable but no data for the series.
    NoData,
    /// Series was not found upstream.
    NotFound,
    /// Credential missing; the fixed configuration-error text was returned.
    ConfigError,
    /// Arguments failed extraction or validation.
    InvalidParams,
    /// Invocation named an unregistered tool.
    UnknownTool,
    /// Upstream transport or status failure.
    UpstreamError,
}

impl ToolOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NoData => "no_data",
            Self::NotFound => "not_found",
            Self::ConfigError => "config_error",
            Self::InvalidParams => "invalid_params",
            Self::UnknownTool => "unknown_tool",
            Self::UpstreamError => "upstream_error",
        }
    }
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event emitted for each tool invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Tool name as received; not necessarily a registered tool.
    pub tool: String,
    /// Invocation outcome.
    pub outcome: ToolOutcome,
    /// Records dropped by the cleaning policy, when a fetch ran.
    pub dropped_records: Option<usize>,
    /// Response text size in bytes.
    pub response_bytes: usize,
}

impl ToolCallEvent {
    /// Creates an event stamped with the current wall clock.
    #[must_use]
    pub fn new(
        tool: &str,
        outcome: ToolOutcome,
        dropped_records: Option<usize>,
        response_bytes: usize,
    ) -> Self {
        Self {
            event: "tool_call",
            timestamp_ms: unix_timestamp_ms(),
            tool: tool.to_string(),
            outcome,
            dropped_records,
            response_bytes,
        }
    }
}

/// Milliseconds since the Unix epoch; zero when the clock is unavailable.
fn unix_timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink receiving tool invocation audit events.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: &ToolCallEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &ToolCallEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &ToolCallEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::ToolCallEvent;
    use super::ToolOutcome;

    #[test]
    fn events_serialize_with_snake_case_outcomes() {
        let event = ToolCallEvent::new("get_series", ToolOutcome::NoData, Some(3), 42);
        let payload = serde_json::to_value(&event).unwrap();
        assert_eq!(payload["event"], "tool_call");
        assert_eq!(payload["outcome"], "no_data");
        assert_eq!(payload["dropped_records"], 3);
        assert_eq!(payload["response_bytes"], 42);
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(ToolOutcome::Ok.as_str(), "ok");
        assert_eq!(ToolOutcome::ConfigError.as_str(), "config_error");
        assert_eq!(ToolOutcome::UpstreamError.as_str(), "upstream_error");
    }
}
