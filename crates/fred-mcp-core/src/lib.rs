// crates/fred-mcp-core/src/lib.rs
// ============================================================================
// Module: fred-mcp Core Library
// Description: Domain types, normalization, and formatting for FRED series data.
// Purpose: Provide the data-cleaning and rendering pipeline shared by the MCP server.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Core domain layer for the fred-mcp server: typed observations and series
//! metadata, the record-cleaning normalizer, the text formatter, and the
//! static MCP tool contracts. Everything here is deterministic and free of
//! I/O; the upstream client and transports live in the `fred-mcp` crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod format;
pub mod metadata;
pub mod normalize;
pub mod observation;
pub mod query;
pub mod tooling;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
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
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use format::render_metadata;
pub use format::render_series;
pub use format::window;
pub use metadata::SeriesMetadata;
pub use normalize::NormalizedSeries;
pub use normalize::normalize;
pub use observation::Observation;
pub use observation::RawObservation;
pub use observation::parse_date;
pub use observation::render_date;
pub use query::DEFAULT_OBSERVATION_LIMIT;
pub use query::SeriesQuery;
pub use tooling::ToolContract;
pub use tooling::ToolDefinition;
pub use tooling::ToolName;
pub use tooling::tool_contracts;
pub use tooling::tool_definitions;
pub use tooling::tooling_markdown;
