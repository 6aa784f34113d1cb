// crates/fred-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool routing for the fred-mcp server.
// Purpose: Expose thin wrappers over the fetch/normalize/format pipeline.
// Dependencies: fred-mcp-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The tool router runs the per-invocation state machine: credential gate,
//! routing, typed argument extraction, delegation to the upstream client and
//! the core pipeline, and audit emission. Every outcome resolves to a single
//! text payload; data-layer failures never surface as protocol faults.
//!
//! ## Invariants
//! - The credential check precedes routing and argument validation.
//! - Transport-failure text and no-data text are never conflated.
//! - No state persists across invocations beyond the memoized credential.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use fred_mcp_core::DEFAULT_OBSERVATION_LIMIT;
use fred_mcp_core::SeriesQuery;
use fred_mcp_core::ToolDefinition;
use fred_mcp_core::ToolName;
use fred_mcp_core::normalize;
use fred_mcp_core::render_metadata;
use fred_mcp_core::render_series;
use fred_mcp_core::tool_definitions;
use serde::Deserialize;
use serde_json::Value;

use crate::audit::AuditSink;
use crate::audit::ToolCallEvent;
use crate::audit::ToolOutcome;
use crate::client::Fetched;
use crate::client::FredClient;
use crate::credential::CredentialSource;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed text returned when the credential is not configured.
pub const MISSING_CREDENTIAL_TEXT: &str = "ERROR: FRED_API_KEY environment variable not set";

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Tool router for MCP requests.
pub struct ToolRouter {
    /// Upstream API client.
    client: FredClient,
    /// Lazily resolved upstream credential.
    credential: CredentialSource,
    /// Audit sink for per-invocation events.
    audit: Arc<dyn AuditSink>,
}

/// Internal reply carrying the rendered text and audit labels.
struct ToolReply {
    /// Rendered text payload.
    text: String,
    /// Outcome label for audit.
    outcome: ToolOutcome,
    /// Dropped-record count when a fetch ran.
    dropped: Option<usize>,
}

impl ToolReply {
    /// Creates a reply without a dropped-record count.
    fn new(text: String, outcome: ToolOutcome) -> Self {
        Self {
            text,
            outcome,
            dropped: None,
        }
    }
}

impl ToolRouter {
    /// Creates a new tool router.
    #[must_use]
    pub fn new(client: FredClient, credential: CredentialSource, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            client,
            credential,
            audit,
        }
    }

    /// Lists the MCP tools supported by this server.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Handles a tool call by name with a JSON argument bundle.
    ///
    /// Every outcome renders as text; the caller wraps it in a single MCP
    /// text content item.
    #[must_use]
    pub fn handle_tool_call(&self, name: &str, arguments: Value) -> String {
        let reply = self.dispatch(name, arguments);
        self.audit.record(&ToolCallEvent::new(
            name,
            reply.outcome,
            reply.dropped,
            reply.text.len(),
        ));
        reply.text
    }

    /// Runs the per-invocation state machine.
    fn dispatch(&self, name: &str, arguments: Value) -> ToolReply {
        // The credential gate runs before routing and argument validation.
        let Some(api_key) = self.credential.api_key() else {
            return ToolReply::new(MISSING_CREDENTIAL_TEXT.to_string(), ToolOutcome::ConfigError);
        };
        let Some(tool) = ToolName::parse(name) else {
            return ToolReply::new(format!("Unknown tool: {name}"), ToolOutcome::UnknownTool);
        };
        match tool {
            ToolName::GetSeries => self.handle_get_series(api_key, arguments),
            ToolName::GetSeriesInfo => self.handle_get_series_info(api_key, arguments),
        }
    }

    /// Handles `get_series` tool requests.
    fn handle_get_series(&self, api_key: &str, arguments: Value) -> ToolReply {
        let request = match decode::<GetSeriesRequest>(ToolName::GetSeries, arguments) {
            Ok(request) => request,
            Err(reply) => return reply,
        };
        if request.series_id.is_empty() {
            return ToolReply::new(
                "Invalid arguments for get_series: series_id must not be empty".to_string(),
                ToolOutcome::InvalidParams,
            );
        }
        let query = SeriesQuery {
            series_id: request.series_id,
            start_date: request.start_date,
            end_date: request.end_date,
            limit: request.limit.unwrap_or(DEFAULT_OBSERVATION_LIMIT),
        };
        let fetched = match self.client.fetch_observations(&query, api_key) {
            Ok(fetched) => fetched,
            Err(err) => {
                return ToolReply::new(
                    format!("Error retrieving data for series '{}': {err}", query.series_id),
                    ToolOutcome::UpstreamError,
                );
            }
        };
        let Fetched::Data(raw) = fetched else {
            return ToolReply::new(
                render_series(&query.series_id, &[], query.limit),
                ToolOutcome::NoData,
            );
        };
        let series = normalize(&raw);
        let outcome =
            if series.observations.is_empty() { ToolOutcome::NoData } else { ToolOutcome::Ok };
        ToolReply {
            text: render_series(&query.series_id, &series.observations, query.limit),
            outcome,
            dropped: Some(series.dropped),
        }
    }

    /// Handles `get_series_info` tool requests.
    fn handle_get_series_info(&self, api_key: &str, arguments: Value) -> ToolReply {
        let request = match decode::<GetSeriesInfoRequest>(ToolName::GetSeriesInfo, arguments) {
            Ok(request) => request,
            Err(reply) => return reply,
        };
        if request.series_id.is_empty() {
            return ToolReply::new(
                "Invalid arguments for get_series_info: series_id must not be empty".to_string(),
                ToolOutcome::InvalidParams,
            );
        }
        match self.client.fetch_series_metadata(&request.series_id, api_key) {
            Ok(Fetched::Data(metadata)) => ToolReply::new(
                render_metadata(&request.series_id, &metadata),
                ToolOutcome::Ok,
            ),
            Ok(Fetched::Missing) => ToolReply::new(
                format!("Series '{}' not found", request.series_id),
                ToolOutcome::NotFound,
            ),
            Err(err) => ToolReply::new(
                format!("Error retrieving series info: {err}"),
                ToolOutcome::UpstreamError,
            ),
        }
    }
}

// ============================================================================
// SECTION: Argument Bundles
// ============================================================================

/// Argument bundle for `get_series`.
#[derive(Debug, Deserialize)]
struct GetSeriesRequest {
    /// Series identifier; required.
    series_id: String,
    /// Optional inclusive start date (`YYYY-MM-DD`), passed through verbatim.
    #[serde(default)]
    start_date: Option<String>,
    /// Optional inclusive end date (`YYYY-MM-DD`), passed through verbatim.
    #[serde(default)]
    end_date: Option<String>,
    /// Optional trailing window size.
    #[serde(default)]
    limit: Option<i64>,
}

/// Argument bundle for `get_series_info`.
#[derive(Debug, Deserialize)]
struct GetSeriesInfoRequest {
    /// Series identifier; required.
    series_id: String,
}

/// Decodes a typed argument bundle, rendering failures as invalid-params text.
fn decode<T: for<'de> Deserialize<'de>>(tool: ToolName, payload: Value) -> Result<T, ToolReply> {
    serde_json::from_value(payload).map_err(|err| {
        ToolReply::new(
            format!("Invalid arguments for {}: {err}", tool.as_str()),
            ToolOutcome::InvalidParams,
        )
    })
}
