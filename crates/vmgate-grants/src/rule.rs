//! Grant rule types and configuration schema.
//!
//! A `GrantConfig` is deserialized from TOML and holds a list of
//! `GrantRule`s. A query is granted if ANY rule matches — rules are
//! additive, there are no negative grants, so declaration order carries
//! no meaning (unlike a first-match policy engine).

use serde::{Deserialize, Serialize};

use vmgate_contracts::token::GrantToken;

/// Whether a rule's subject names a user or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectKind {
    User,
    Group,
}

/// One grant declaration loaded from TOML.
///
/// `namespace` and `object` support the special wildcard value `"*"`,
/// which matches any string; anything else must match exactly.
///
/// Example:
/// ```toml
/// [[grants]]
/// kind = "group"
/// subject = "media-operators"
/// namespace = "apps"
/// object = "*"
/// tokens = ["cdrom-media"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRule {
    /// Whether `subject` is matched against the username or the groups.
    pub kind: SubjectKind,

    /// The user or group name this rule grants to.
    pub subject: String,

    /// Namespace pattern; `"*"` matches any namespace.
    pub namespace: String,

    /// Object-name pattern; `"*"` matches any object.
    pub object: String,

    /// Every token this rule grants for matching queries.
    pub tokens: Vec<GrantToken>,
}

impl GrantRule {
    /// Return true if this rule answers the given query positively.
    pub fn matches(
        &self,
        username: &str,
        groups: &[String],
        namespace: &str,
        object: &str,
        token: GrantToken,
    ) -> bool {
        let subject_matches = match self.kind {
            SubjectKind::User => self.subject == username,
            SubjectKind::Group => groups.iter().any(|g| *g == self.subject),
        };

        subject_matches
            && (self.namespace == "*" || self.namespace == namespace)
            && (self.object == "*" || self.object == object)
            && self.tokens.contains(&token)
    }
}

/// The top-level structure deserialized from a TOML grants file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Additive list of grants; any match suffices.
    #[serde(default)]
    pub grants: Vec<GrantRule>,
}
