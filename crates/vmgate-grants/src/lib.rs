//! # vmgate-grants
//!
//! A TOML-driven, static grant table implementing the
//! [`PermissionOracle`](vmgate_core::traits::PermissionOracle) trait.
//!
//! Production deployments back the oracle with the cluster's access
//! review API; this crate exists for demos, tests, and standalone use.
//! Rules are additive — a query is granted if any rule matches — and
//! there are no negative grants.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use vmgate_grants::GrantTable;
//!
//! let table = GrantTable::from_toml_str(r#"
//!     [[grants]]
//!     kind = "user"
//!     subject = "alice"
//!     namespace = "apps"
//!     object = "*"
//!     tokens = ["storage", "compute"]
//! "#)?;
//! // Pass `Box::new(table)` to `AdmissionPipeline::new(...)`.
//! ```

pub mod rule;
pub mod table;

pub use rule::{GrantConfig, GrantRule, SubjectKind};
pub use table::GrantTable;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use vmgate_contracts::{error::GateError, identity::Identity, token::GrantToken};
    use vmgate_core::traits::PermissionOracle;

    use crate::rule::SubjectKind;
    use crate::GrantTable;

    fn alice() -> Identity {
        Identity::new(
            "alice",
            vec!["developers".to_string(), "media-operators".to_string()],
            "uid-1",
        )
    }

    // ── TOML loading ──────────────────────────────────────────────────────────

    #[test]
    fn test_toml_grant_for_user() {
        let table = GrantTable::from_toml_str(
            r#"
            [[grants]]
            kind = "user"
            subject = "alice"
            namespace = "apps"
            object = "*"
            tokens = ["storage", "compute"]
            "#,
        )
        .unwrap();

        assert!(table
            .authorize(&alice(), "apps", "vm-a", GrantToken::Storage)
            .unwrap());
        assert!(table
            .authorize(&alice(), "apps", "vm-b", GrantToken::Compute)
            .unwrap());

        // Tokens outside the rule's list are not granted.
        assert!(!table
            .authorize(&alice(), "apps", "vm-a", GrantToken::Network)
            .unwrap());
    }

    #[test]
    fn test_toml_grant_for_group() {
        let table = GrantTable::from_toml_str(
            r#"
            [[grants]]
            kind = "group"
            subject = "media-operators"
            namespace = "*"
            object = "*"
            tokens = ["cdrom-media"]
            "#,
        )
        .unwrap();

        // Alice is in media-operators.
        assert!(table
            .authorize(&alice(), "apps", "vm-a", GrantToken::CdromMedia)
            .unwrap());

        // Bob is not.
        let bob = Identity::new("bob", vec!["viewers".to_string()], "uid-2");
        assert!(!table
            .authorize(&bob, "apps", "vm-a", GrantToken::CdromMedia)
            .unwrap());
    }

    #[test]
    fn test_namespace_and_object_must_match_without_wildcard() {
        let table = GrantTable::new().grant(
            SubjectKind::User,
            "alice",
            "apps",
            "vm-a",
            GrantToken::Lifecycle,
        );

        assert!(table
            .authorize(&alice(), "apps", "vm-a", GrantToken::Lifecycle)
            .unwrap());
        assert!(!table
            .authorize(&alice(), "apps", "vm-b", GrantToken::Lifecycle)
            .unwrap());
        assert!(!table
            .authorize(&alice(), "prod", "vm-a", GrantToken::Lifecycle)
            .unwrap());
    }

    #[test]
    fn test_rules_are_additive() {
        let table = GrantTable::new()
            .grant(SubjectKind::User, "alice", "*", "*", GrantToken::Storage)
            .grant(
                SubjectKind::Group,
                "developers",
                "apps",
                "*",
                GrantToken::Network,
            );

        assert!(table
            .authorize(&alice(), "prod", "vm-x", GrantToken::Storage)
            .unwrap());
        assert!(table
            .authorize(&alice(), "apps", "vm-x", GrantToken::Network)
            .unwrap());
        assert!(!table
            .authorize(&alice(), "prod", "vm-x", GrantToken::Network)
            .unwrap());
    }

    #[test]
    fn test_empty_table_grants_nothing() {
        let table = GrantTable::new();
        assert!(!table
            .authorize(&alice(), "apps", "vm-a", GrantToken::FullAdmin)
            .unwrap());
    }

    // ── Parse failures ────────────────────────────────────────────────────────

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = GrantTable::from_toml_str("this is not valid toml ][[[");
        match result {
            Err(GateError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse grants TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_token_name_is_config_error() {
        let result = GrantTable::from_toml_str(
            r#"
            [[grants]]
            kind = "user"
            subject = "alice"
            namespace = "*"
            object = "*"
            tokens = ["storage-admin"]
            "#,
        );
        assert!(matches!(result, Err(GateError::ConfigError { .. })));
    }
}
