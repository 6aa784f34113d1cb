// crates/fred-mcp-core/src/observation.rs
// ============================================================================
// Module: Series Observations
// Description: Raw and normalized observation records for FRED series data.
// Purpose: Provide typed observations with strict calendar-date handling.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Upstream observation records arrive as loosely typed JSON with string
//! dates and string values. This module defines the raw record shape the
//! client deserializes and the strict normalized form consumed by the
//! formatter. Missing values are marked `"."` upstream; the normalizer drops
//! such records rather than coercing them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Calendar date format used by the upstream API (`YYYY-MM-DD`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Types
// ============================================================================

/// Raw observation record as returned by the upstream API.
///
/// Both fields default to empty strings so partial records still
/// deserialize; the normalizer drops them instead of failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Observation date string (`YYYY-MM-DD` when well formed).
    #[serde(default)]
    pub date: String,
    /// Observation value string; `"."` marks a missing value upstream.
    #[serde(default)]
    pub value: String,
}

/// Normalized observation with a typed date and finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: Date,
    /// Observation value; always a finite number.
    pub value: f64,
}

// ============================================================================
// SECTION: Date Handling
// ============================================================================

/// Parses an upstream date string as a calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, DATE_FORMAT).ok()
}

/// Renders a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn render_date(date: Date) -> String {
    date.format(DATE_FORMAT).map_or_else(|_| date.to_string(), |text| text)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
