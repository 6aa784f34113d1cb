// crates/fred-mcp-core/src/query.rs
// ============================================================================
// Module: Series Query
// Description: Parameters for a single observations query.
// Purpose: Carry the series identifier, date bounds, and trailing window size.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`SeriesQuery`] describes one `get_series` invocation. The series
//! identifier is opaque and never validated against a catalog; date bounds
//! are passed through to the upstream API verbatim so it remains the source
//! of truth for date-format errors.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of trailing observations returned by `get_series`.
pub const DEFAULT_OBSERVATION_LIMIT: i64 = 100;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parameters for one observations query against the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    /// Opaque series identifier; required and non-empty.
    pub series_id: String,
    /// Optional inclusive start date, passed through verbatim.
    pub start_date: Option<String>,
    /// Optional inclusive end date, passed through verbatim.
    pub end_date: Option<String>,
    /// Trailing window size applied after normalization; values below one
    /// disable truncation.
    pub limit: i64,
}

impl SeriesQuery {
    /// Creates a query for the given series with default window size and no
    /// date bounds.
    #[must_use]
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            start_date: None,
            end_date: None,
            limit: DEFAULT_OBSERVATION_LIMIT,
        }
    }
}
