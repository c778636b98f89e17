//! Static grant table implementing the `PermissionOracle` trait.
//!
//! `GrantTable` answers authorization queries from a fixed rule set
//! loaded from TOML (or built programmatically in tests). It never
//! errors: every query completes, so the only verdict-vs-error
//! distinction it exercises is "granted" against "not granted". Error
//! paths are covered by oracle doubles in the pipeline tests.

use std::path::Path;

use tracing::debug;

use vmgate_contracts::{
    error::{GateError, GateResult},
    identity::Identity,
    token::GrantToken,
};
use vmgate_core::traits::PermissionOracle;

use crate::rule::{GrantConfig, GrantRule, SubjectKind};

/// A `PermissionOracle` backed by a static, additive rule set.
///
/// Construct via `from_toml_str`, `from_file`, or the `grant` builder.
#[derive(Debug, Default)]
pub struct GrantTable {
    config: GrantConfig,
}

impl GrantTable {
    /// An empty table: every query answers "not granted".
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `s` as TOML and build a `GrantTable`.
    ///
    /// Returns `GateError::ConfigError` if the TOML is malformed or does
    /// not match the expected `GrantConfig` schema.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        let config: GrantConfig = toml::from_str(s).map_err(|e| GateError::ConfigError {
            reason: format!("failed to parse grants TOML: {}", e),
        })?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as TOML grant configuration.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
            reason: format!("failed to read grants file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Add one grant programmatically. Chainable; used by tests and demos.
    pub fn grant(
        mut self,
        kind: SubjectKind,
        subject: impl Into<String>,
        namespace: impl Into<String>,
        object: impl Into<String>,
        token: GrantToken,
    ) -> Self {
        self.config.grants.push(GrantRule {
            kind,
            subject: subject.into(),
            namespace: namespace.into(),
            object: object.into(),
            tokens: vec![token],
        });
        self
    }
}

impl PermissionOracle for GrantTable {
    /// Answer the query from the rule set; any matching rule grants.
    fn authorize(
        &self,
        actor: &Identity,
        namespace: &str,
        object_name: &str,
        token: GrantToken,
    ) -> GateResult<bool> {
        let granted = self.config.grants.iter().any(|rule| {
            rule.matches(&actor.username, &actor.groups, namespace, object_name, token)
        });

        debug!(
            actor = %actor.username,
            namespace = %namespace,
            object = %object_name,
            token = %token,
            granted,
            "grant table query"
        );

        Ok(granted)
    }
}
