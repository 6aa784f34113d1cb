// crates/fred-mcp-core/src/metadata.rs
// ============================================================================
// Module: Series Metadata
// Description: Metadata record for a single FRED series.
// Purpose: Model the optional upstream metadata fields without coercion.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every metadata field is optional on the upstream side. The record keeps
//! them optional; the formatter substitutes a literal placeholder when a
//! field is absent rather than inventing values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Metadata describing a single upstream series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Human-readable series title.
    #[serde(default)]
    pub title: Option<String>,
    /// Observation frequency label (for example `Monthly`).
    #[serde(default)]
    pub frequency: Option<String>,
    /// Units label for observation values.
    #[serde(default)]
    pub units: Option<String>,
    /// Seasonal adjustment label.
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    /// Timestamp of the last upstream revision.
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Free-form series notes; may be long.
    #[serde(default)]
    pub notes: Option<String>,
}
