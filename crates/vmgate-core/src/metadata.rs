//! Normalization of system-managed metadata fields.
//!
//! The server rewrites these fields on every stored update, so they always
//! differ between the old and new snapshot for reasons unrelated to user
//! intent. The pipeline clears them on both working copies — always,
//! unconditionally, after the checker pass — so they never contribute to
//! the residual diff.
//!
//! The field set here is fixed and independent of any checker. Labels and
//! annotations are user-authored and deliberately left alone.

use vmgate_contracts::machine::ObjectMeta;

/// Clear the system-managed bookkeeping fields to equal neutral values
/// in both copies.
pub fn normalize_system_metadata(old: &mut ObjectMeta, new: &mut ObjectMeta) {
    old.resource_version.clear();
    new.resource_version.clear();

    old.generation = 0;
    new.generation = 0;

    old.managed_fields.clear();
    new.managed_fields.clear();

    old.self_link.clear();
    new.self_link.clear();

    // uid and the timestamps are immutable upstream, but normalize them
    // anyway so a malformed request cannot smuggle a diff through them.
    old.uid.clear();
    new.uid.clear();

    old.creation_timestamp = None;
    new.creation_timestamp = None;

    old.deletion_timestamp = None;
    new.deletion_timestamp = None;

    old.deletion_grace_period_seconds = None;
    new.deletion_grace_period_seconds = None;
}
