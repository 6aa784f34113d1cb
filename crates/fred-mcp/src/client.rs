// crates/fred-mcp/src/client.rs
// ============================================================================
// Module: FRED Upstream Client
// Description: Blocking HTTP client for the FRED observations and series APIs.
// Purpose: Issue one bounded GET per logical query with strict limits.
// Dependencies: fred-mcp-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! The upstream client owns credential injection and response parsing. Each
//! logical query issues exactly one GET with a fixed timeout; there are no
//! retries and no caching. Outcomes are tagged so callers can always
//! distinguish "upstream reachable but the series is absent" from "upstream
//! unreachable": the former is [`Fetched::Missing`], the latter an
//! [`UpstreamError`]. Transport error text is rendered without the request
//! URL so the credential query parameter cannot leak.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use fred_mcp_core::RawObservation;
use fred_mcp_core::SeriesMetadata;
use fred_mcp_core::SeriesQuery;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Deserialize;
use thiserror::Error;

use crate::config::UpstreamConfig;

// ============================================================================
// SECTION: Outcome Types
// ============================================================================

/// Tagged fetch outcome distinguishing data from an absent payload key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// Upstream returned the expected payload.
    Data(T),
    /// Upstream was reachable but the expected key was absent or empty.
    Missing,
}

/// Upstream request errors.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure (connect, timeout, protocol).
    #[error("request failed: {0}")]
    Transport(String),
    /// Upstream returned a non-success HTTP status.
    #[error("unexpected upstream status {0}")]
    Status(u16),
    /// Response body exceeded the configured size limit.
    #[error("upstream response exceeds size limit")]
    ResponseTooLarge,
    /// Response body was not the expected JSON shape.
    #[error("invalid upstream JSON: {0}")]
    Decode(String),
}

/// Errors building the upstream client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL failed validation.
    #[error("invalid base url: {0}")]
    BaseUrl(String),
    /// HTTP client construction failed.
    #[error("http client build failed")]
    Build,
}

// ============================================================================
// SECTION: Response Shapes
// ============================================================================

/// Top-level shape of the observations endpoint response.
#[derive(Debug, Deserialize)]
struct ObservationsBody {
    /// Observation records when the expected key is present.
    #[serde(default)]
    observations: Option<Vec<RawObservation>>,
}

/// Top-level shape of the series metadata endpoint response.
#[derive(Debug, Deserialize)]
struct SeriesBody {
    /// Metadata records when the expected key is present.
    #[serde(default)]
    seriess: Option<Vec<SeriesMetadata>>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client for the FRED API.
pub struct FredClient {
    /// Client configuration, including limits and base URL.
    config: UpstreamConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl FredClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: UpstreamConfig) -> Result<Self, ClientError> {
        validate_base_url(&config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| ClientError::Build)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Fetches raw observation records for one series query.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, non-success status,
    /// oversized body, or undecodable JSON.
    pub fn fetch_observations(
        &self,
        query: &SeriesQuery,
        api_key: &str,
    ) -> Result<Fetched<Vec<RawObservation>>, UpstreamError> {
        let mut params = vec![
            ("series_id".to_string(), query.series_id.clone()),
            ("api_key".to_string(), api_key.to_string()),
            ("file_type".to_string(), "json".to_string()),
        ];
        if let Some(start) = &query.start_date {
            params.push(("observation_start".to_string(), start.clone()));
        }
        if let Some(end) = &query.end_date {
            params.push(("observation_end".to_string(), end.clone()));
        }
        let body = self.get_json(&self.endpoint("series/observations"), &params)?;
        let parsed: ObservationsBody =
            serde_json::from_slice(&body).map_err(|err| UpstreamError::Decode(err.to_string()))?;
        Ok(match parsed.observations {
            Some(observations) => Fetched::Data(observations),
            None => Fetched::Missing,
        })
    }

    /// Fetches the metadata record for one series.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, non-success status,
    /// oversized body, or undecodable JSON.
    pub fn fetch_series_metadata(
        &self,
        series_id: &str,
        api_key: &str,
    ) -> Result<Fetched<SeriesMetadata>, UpstreamError> {
        let params = vec![
            ("series_id".to_string(), series_id.to_string()),
            ("api_key".to_string(), api_key.to_string()),
            ("file_type".to_string(), "json".to_string()),
        ];
        let body = self.get_json(&self.endpoint("series"), &params)?;
        let parsed: SeriesBody =
            serde_json::from_slice(&body).map_err(|err| UpstreamError::Decode(err.to_string()))?;
        let record = parsed.seriess.and_then(|mut records| {
            if records.is_empty() { None } else { Some(records.remove(0)) }
        });
        Ok(match record {
            Some(metadata) => Fetched::Data(metadata),
            None => Fetched::Missing,
        })
    }

    /// Joins an endpoint path onto the configured base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issues one GET request and reads the body under the size limit.
    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Vec<u8>, UpstreamError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|err| UpstreamError::Transport(err.without_url().to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        read_response_limited(response, self.config.max_response_bytes)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the configured base URL scheme and shape.
fn validate_base_url(config: &UpstreamConfig) -> Result<(), ClientError> {
    let url = Url::parse(&config.base_url)
        .map_err(|_| ClientError::BaseUrl("not a valid URL".to_string()))?;
    match url.scheme() {
        "https" => Ok(()),
        "http" if config.allow_http => Ok(()),
        other => Err(ClientError::BaseUrl(format!("unsupported scheme '{other}'"))),
    }
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(response: Response, max_bytes: usize) -> Result<Vec<u8>, UpstreamError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| UpstreamError::ResponseTooLarge)?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(UpstreamError::ResponseTooLarge);
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| UpstreamError::Transport("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(UpstreamError::ResponseTooLarge);
    }
    Ok(buf)
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

    use super::FredClient;
    use super::validate_base_url;
    use crate::config::UpstreamConfig;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client = FredClient::new(UpstreamConfig {
            base_url: "https://api.stlouisfed.org/fred/".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("series/observations"),
            "https://api.stlouisfed.org/fred/series/observations"
        );
    }

    #[test]
    fn cleartext_base_url_is_rejected_by_default() {
        let config = UpstreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..UpstreamConfig::default()
        };
        assert!(validate_base_url(&config).is_err());
        let permissive = UpstreamConfig {
            allow_http: true,
            ..config
        };
        assert!(validate_base_url(&permissive).is_ok());
    }
}
