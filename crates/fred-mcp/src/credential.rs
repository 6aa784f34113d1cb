// crates/fred-mcp/src/credential.rs
// ============================================================================
// Module: Upstream Credential
// Description: Lazy, memoized lookup of the FRED API credential.
// Purpose: Resolve the credential once and keep it read-only thereafter.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The credential is the only cross-invocation shared resource. It is
//! resolved from the environment at most once, on first tool invocation, and
//! the outcome is memoized for the life of the process. Absence is a
//! terminal condition reported identically by every tool call, not a
//! per-call error to retry. The source is an explicit value threaded through
//! the router; there is no ambient global.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable supplying the upstream API credential.
pub const CREDENTIAL_ENV_VAR: &str = "FRED_API_KEY";

// ============================================================================
// SECTION: Credential Source
// ============================================================================

/// Lazily resolved upstream credential.
///
/// No `Debug` implementation is derived so the secret cannot leak through
/// formatting.
pub struct CredentialSource {
    /// Memoized lookup outcome; empty values resolve to `None`.
    cell: OnceLock<Option<String>>,
    /// Environment variable consulted on first access.
    env_var: String,
}

impl CredentialSource {
    /// Creates a source backed by the default environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_var(CREDENTIAL_ENV_VAR)
    }

    /// Creates a source backed by a specific environment variable.
    #[must_use]
    pub fn from_env_var(name: impl Into<String>) -> Self {
        Self {
            cell: OnceLock::new(),
            env_var: name.into(),
        }
    }

    /// Creates a source with a fixed credential, bypassing the environment.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Some(key.into()));
        Self {
            cell,
            env_var: String::new(),
        }
    }

    /// Creates a source that never resolves a credential.
    #[must_use]
    pub fn absent() -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(None);
        Self {
            cell,
            env_var: String::new(),
        }
    }

    /// Returns the credential, resolving and memoizing it on first access.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.cell
            .get_or_init(|| env::var(&self.env_var).ok().filter(|value| !value.is_empty()))
            .as_deref()
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
        reason = "Test-only panic-based assertions."
    )]

    use super::CredentialSource;

    #[test]
    fn with_key_resolves_fixed_credential() {
        let source = CredentialSource::with_key("secret");
        assert_eq!(source.api_key(), Some("secret"));
    }

    #[test]
    fn absent_never_resolves() {
        let source = CredentialSource::absent();
        assert_eq!(source.api_key(), None);
        assert_eq!(source.api_key(), None);
    }

    #[test]
    fn unset_variable_memoizes_as_missing() {
        let source = CredentialSource::from_env_var("FRED_MCP_TEST_UNSET_CREDENTIAL");
        assert_eq!(source.api_key(), None);
        assert_eq!(source.api_key(), None);
    }
}
