// crates/fred-mcp-core/src/format.rs
// ============================================================================
// Module: Text Formatter
// Description: Fixed-width text rendering for series data and metadata.
// Purpose: Produce deterministic, human-readable tool output.
// Dependencies: fred-mcp-core::metadata, fred-mcp-core::observation
// ============================================================================

//! ## Overview
//! The formatter renders a normalized observation window as a header block
//! plus a two-column table, and a metadata record as labelled lines with
//! literal placeholders for absent fields. Rendering is pure: the same input
//! always yields byte-identical text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::metadata::SeriesMetadata;
use crate::observation::Observation;
use crate::observation::render_date;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of characters rendered from series notes.
const MAX_NOTES_CHARS: usize = 200;
/// Placeholder rendered for absent metadata fields.
const ABSENT_FIELD: &str = "N/A";
/// Width of the date column in the observation table.
const DATE_COLUMN_WIDTH: usize = 12;
/// Width of the value column in the observation table.
const VALUE_COLUMN_WIDTH: usize = 12;

// ============================================================================
// SECTION: Windowing
// ============================================================================

/// Returns the trailing window of an observation sequence.
///
/// A `limit` greater than zero keeps at most the last `limit` entries in
/// their original order. A `limit` of zero or below disables truncation and
/// returns the full sequence; it never yields an empty slice for non-empty
/// input.
#[must_use]
pub fn window(observations: &[Observation], limit: i64) -> &[Observation] {
    if limit <= 0 {
        return observations;
    }
    let Ok(keep) = usize::try_from(limit) else {
        return observations;
    };
    if observations.len() <= keep {
        observations
    } else {
        &observations[observations.len() - keep..]
    }
}

// ============================================================================
// SECTION: Series Rendering
// ============================================================================

/// Renders an observation window as a text report.
///
/// The header states the series identifier, the windowed observation count,
/// and the minimum/maximum date over the windowed set. An empty window
/// renders the fixed no-data line instead, which is distinct from any
/// transport-failure text.
#[must_use]
pub fn render_series(series_id: &str, observations: &[Observation], window_limit: i64) -> String {
    let windowed = window(observations, window_limit);
    if windowed.is_empty() {
        return format!(
            "No data retrieved for series '{series_id}'. Verify series ID validity or \
             connectivity."
        );
    }
    let (earliest, latest) = date_span(windowed);
    let mut out = String::new();
    out.push_str(&format!("Series: {series_id}\n"));
    out.push_str(&format!("Observations: {}\n", windowed.len()));
    out.push_str(&format!("Period: {earliest} to {latest}\n\n"));
    out.push_str(&format!("{:<DATE_COLUMN_WIDTH$}{:>VALUE_COLUMN_WIDTH$}\n", "date", "value"));
    for observation in windowed {
        out.push_str(&format!(
            "{:<DATE_COLUMN_WIDTH$}{:>VALUE_COLUMN_WIDTH$}\n",
            render_date(observation.date),
            observation.value
        ));
    }
    out
}

/// Computes the minimum and maximum date over a non-empty window.
fn date_span(observations: &[Observation]) -> (String, String) {
    let mut earliest = observations[0].date;
    let mut latest = observations[0].date;
    for observation in observations {
        earliest = earliest.min(observation.date);
        latest = latest.max(observation.date);
    }
    (render_date(earliest), render_date(latest))
}

// ============================================================================
// SECTION: Metadata Rendering
// ============================================================================

/// Renders a series metadata record as labelled text lines.
#[must_use]
pub fn render_metadata(series_id: &str, metadata: &SeriesMetadata) -> String {
    let mut out = String::new();
    out.push_str(&format!("Series Information: {series_id}\n"));
    out.push_str(&format!("Title: {}\n", field_or_absent(metadata.title.as_deref())));
    out.push_str(&format!("Frequency: {}\n", field_or_absent(metadata.frequency.as_deref())));
    out.push_str(&format!("Units: {}\n", field_or_absent(metadata.units.as_deref())));
    out.push_str(&format!(
        "Seasonal Adjustment: {}\n",
        field_or_absent(metadata.seasonal_adjustment.as_deref())
    ));
    out.push_str(&format!("Last Updated: {}\n", field_or_absent(metadata.last_updated.as_deref())));
    out.push_str(&format!("Notes: {}", render_notes(metadata.notes.as_deref())));
    out
}

/// Substitutes the literal placeholder for an absent field.
fn field_or_absent(field: Option<&str>) -> &str {
    field.unwrap_or(ABSENT_FIELD)
}

/// Truncates notes to the character limit, appending an ellipsis marker
/// only when the original text is longer.
fn render_notes(notes: Option<&str>) -> String {
    let notes = notes.unwrap_or(ABSENT_FIELD);
    let mut chars = notes.chars();
    let head: String = chars.by_ref().take(MAX_NOTES_CHARS).collect();
    if chars.next().is_some() { format!("{head}...") } else { head }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
