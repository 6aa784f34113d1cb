// crates/fred-mcp-core/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical MCP tool definitions and schemas for fred-mcp.
// Purpose: Provide the static tool catalog for MCP listing and docs.
// Dependencies: serde_json, std
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface: two tools, each with
//! a JSON Schema describing its arguments. The contracts drive the MCP
//! `tools/list` response and the CLI tool reference. The catalog is static;
//! it is built at call time from constants and never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::query::DEFAULT_OBSERVATION_LIMIT;

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical MCP tool names for fred-mcp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Retrieve observations from a series.
    GetSeries,
    /// Retrieve metadata about a series.
    GetSeriesInfo,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetSeries => "get_series",
            Self::GetSeriesInfo => "get_series_info",
        }
    }

    /// Parses a tool name string into a known tool.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get_series" => Some(Self::GetSeries),
            "get_series_info" => Some(Self::GetSeriesInfo),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Contract Types
// ============================================================================

/// Tool definition shape used by MCP tool listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool contract with input schema and usage notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// Notes describing tool usage.
    pub notes: Vec<String>,
}

// ============================================================================
// SECTION: Tool Contracts
// ============================================================================

/// Returns the canonical MCP tool contracts.
///
/// The order is intentional and preserved in generated docs. Append new
/// tools at the end.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    vec![get_series_contract(), get_series_info_contract()]
}

/// Builds the tool contract for `get_series`.
fn get_series_contract() -> ToolContract {
    ToolContract {
        name: ToolName::GetSeries,
        description: "Retrieve observations from a FRED series. Returns time series data with \
                      date and value columns. Common series IDs: FEDFUNDS (Fed Funds Rate), GDP \
                      (Gross Domestic Product), CPIAUCSL (CPI Inflation), UNRATE (Unemployment \
                      Rate), WALCL (Fed Balance Sheet)"
            .to_string(),
        input_schema: object_schema(
            &json!({
                "series_id": {
                    "type": "string",
                    "description": "FRED series identifier (e.g., FEDFUNDS, GDP, CPIAUCSL)"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date in YYYY-MM-DD format",
                    "format": "date"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in YYYY-MM-DD format",
                    "format": "date"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of observations to return",
                    "default": DEFAULT_OBSERVATION_LIMIT
                }
            }),
            &["series_id"],
        ),
        notes: vec![
            "Date bounds are passed through verbatim; the upstream API is the source of truth \
             for date-format errors."
                .to_string(),
            "limit keeps the trailing window of observations after cleaning; values below one \
             disable truncation."
                .to_string(),
            "Records whose value is not a finite number are dropped, never coerced.".to_string(),
        ],
    }
}

/// Builds the tool contract for `get_series_info`.
fn get_series_info_contract() -> ToolContract {
    ToolContract {
        name: ToolName::GetSeriesInfo,
        description: "Get information about a FRED series including title, frequency, units, \
                      and notes"
            .to_string(),
        input_schema: object_schema(
            &json!({
                "series_id": {
                    "type": "string",
                    "description": "FRED series identifier"
                }
            }),
            &["series_id"],
        ),
        notes: vec![
            "Absent metadata fields render as the literal placeholder N/A.".to_string(),
            "Notes are truncated to 200 characters with a trailing ellipsis marker.".to_string(),
        ],
    }
}

/// Returns the MCP tool definitions for tool listing.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let contracts = tool_contracts();
    let mut definitions = Vec::with_capacity(contracts.len());
    for contract in contracts {
        definitions.push(ToolDefinition {
            name: contract.name,
            description: contract.description,
            input_schema: contract.input_schema,
        });
    }
    definitions
}

// ============================================================================
// SECTION: Markdown Rendering
// ============================================================================

/// Builds markdown documentation for the tool contracts.
#[must_use]
pub fn tooling_markdown(contracts: &[ToolContract]) -> String {
    let mut out = String::new();
    out.push_str("# fred-mcp Tools\n\n");
    out.push_str("This document summarizes the MCP tool surface and expected usage.\n\n");
    out.push_str("| Tool | Description |\n");
    out.push_str("| --- | --- |\n");
    for contract in contracts {
        out.push_str("| ");
        out.push_str(contract.name.as_str());
        out.push_str(" | ");
        out.push_str(&contract.description);
        out.push_str(" |\n");
    }
    out.push('\n');
    for contract in contracts {
        out.push_str("## ");
        out.push_str(contract.name.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str(contract.description.as_str());
        out.push('\n');
        out.push('\n');
        out.push_str("### Inputs\n\n");
        render_schema_fields(&mut out, &contract.input_schema);
        out.push('\n');
        if !contract.notes.is_empty() {
            out.push_str("### Notes\n\n");
            for note in &contract.notes {
                out.push_str("- ");
                out.push_str(note);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

/// Builds a standard object schema with required field names.
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Render top-level schema fields as markdown bullet points.
fn render_schema_fields(out: &mut String, schema: &Value) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        out.push_str("_No fields._\n");
        return;
    };
    let required = required_field_set(schema);
    let mut keys: Vec<&String> = properties.keys().collect();
    keys.sort();
    for key in keys {
        let description =
            properties[key].get("description").and_then(Value::as_str).unwrap_or_default();
        let required_label = if required.contains(key.as_str()) { "required" } else { "optional" };
        out.push_str(&format!("- `{key}` ({required_label}): {description}\n"));
    }
}

/// Collects the required field names declared by an object schema.
fn required_field_set(schema: &Value) -> BTreeSet<String> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|entries| {
            entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
        })
        .unwrap_or_default()
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

    use serde_json::Value;

    use super::ToolName;
    use super::tool_contracts;
    use super::tool_definitions;
    use super::tooling_markdown;

    #[test]
    fn tool_names_round_trip() {
        for name in [ToolName::GetSeries, ToolName::GetSeriesInfo] {
            assert_eq!(ToolName::parse(name.as_str()), Some(name));
        }
        assert_eq!(ToolName::parse("get_series_batch"), None);
    }

    #[test]
    fn catalog_lists_exactly_two_tools() {
        let definitions = tool_definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, ToolName::GetSeries);
        assert_eq!(definitions[1].name, ToolName::GetSeriesInfo);
    }

    #[test]
    fn get_series_schema_requires_series_id() {
        let definitions = tool_definitions();
        for definition in &definitions {
            let required = definition.input_schema["required"]
                .as_array()
                .map(|entries| entries.iter().filter_map(Value::as_str).collect::<Vec<_>>())
                .unwrap_or_default();
            assert_eq!(required, vec!["series_id"]);
        }
    }

    #[test]
    fn definitions_serialize_camel_case_schema_key() {
        let definitions = tool_definitions();
        let value = serde_json::to_value(&definitions[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn markdown_covers_every_tool() {
        let contracts = tool_contracts();
        let markdown = tooling_markdown(&contracts);
        assert!(markdown.contains("## get_series\n"));
        assert!(markdown.contains("## get_series_info\n"));
        assert!(markdown.contains("- `series_id` (required):"));
        assert!(markdown.contains("- `limit` (optional):"));
    }
}
