// crates/fred-mcp-core/src/normalize.rs
// ============================================================================
// Module: Observation Normalizer
// Description: Record-level cleaning of raw upstream observation batches.
// Purpose: Convert loose string records into typed, finite observations.
// Dependencies: fred-mcp-core::observation
// ============================================================================

//! ## Overview
//! The normalizer applies the record-level cleaning policy: a record whose
//! value does not parse as a finite number, or whose date is not a valid
//! calendar date, is dropped without aborting the batch. Dropped records are
//! counted so the policy stays observable in audit logs, but the count never
//! changes the rendered result. Upstream order is preserved; nothing is
//! sorted, deduplicated, or interpolated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::observation::Observation;
use crate::observation::RawObservation;
use crate::observation::parse_date;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Result of normalizing a raw observation batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    /// Observations that survived cleaning, in upstream order.
    pub observations: Vec<Observation>,
    /// Number of records dropped by the cleaning policy.
    pub dropped: usize,
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Cleans a raw observation batch into typed observations.
///
/// Empty input yields an empty result, not an error. Output length is never
/// greater than input length, and every surviving value is finite.
#[must_use]
pub fn normalize(raw: &[RawObservation]) -> NormalizedSeries {
    let mut observations = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for record in raw {
        let value = record.value.trim().parse::<f64>().ok().filter(|value| value.is_finite());
        match (parse_date(&record.date), value) {
            (Some(date), Some(value)) => observations.push(Observation {
                date,
                value,
            }),
            _ => dropped += 1,
        }
    }
    NormalizedSeries {
        observations,
        dropped,
    }
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
        clippy::float_cmp,
        reason = "Test-only panic-based assertions on exact parsed values."
    )]

    use super::normalize;
    use crate::observation::RawObservation;

    /// Builds a raw record from date and value strings.
    fn raw(date: &str, value: &str) -> RawObservation {
        RawObservation {
            date: date.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn normalize_drops_non_numeric_values() {
        let records = vec![
            raw("2024-01-01", "5.25"),
            raw("2024-02-01", "bad"),
            raw("2024-03-01", "5.50"),
        ];
        let series = normalize(&records);
        assert_eq!(series.observations.len(), 2);
        assert_eq!(series.dropped, 1);
        assert_eq!(series.observations[0].value, 5.25);
        assert_eq!(series.observations[1].value, 5.50);
    }

    #[test]
    fn normalize_drops_missing_value_marker() {
        let records = vec![raw("2024-01-01", "."), raw("2024-02-01", "3.1")];
        let series = normalize(&records);
        assert_eq!(series.observations.len(), 1);
        assert_eq!(series.dropped, 1);
    }

    #[test]
    fn normalize_drops_non_finite_values() {
        let records = vec![
            raw("2024-01-01", "NaN"),
            raw("2024-02-01", "inf"),
            raw("2024-03-01", "-inf"),
            raw("2024-04-01", "2.0"),
        ];
        let series = normalize(&records);
        assert_eq!(series.observations.len(), 1);
        assert_eq!(series.dropped, 3);
        assert!(series.observations[0].value.is_finite());
    }

    #[test]
    fn normalize_drops_malformed_dates() {
        let records = vec![raw("2024-02-30", "1.0"), raw("", "1.0"), raw("2024-02-01", "1.0")];
        let series = normalize(&records);
        assert_eq!(series.observations.len(), 1);
        assert_eq!(series.dropped, 2);
    }

    #[test]
    fn normalize_preserves_upstream_order() {
        let records = vec![
            raw("2024-03-01", "3.0"),
            raw("2024-01-01", "1.0"),
            raw("2024-02-01", "2.0"),
        ];
        let series = normalize(&records);
        let values: Vec<f64> = series.observations.iter().map(|obs| obs.value).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn normalize_empty_input_is_empty_output() {
        let series = normalize(&[]);
        assert!(series.observations.is_empty());
        assert_eq!(series.dropped, 0);
    }
}
