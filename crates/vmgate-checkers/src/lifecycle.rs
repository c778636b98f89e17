//! The lifecycle checker.
//!
//! Footprint: the desired `running` flag and the `run_strategy` enum.
//! These live directly on the spec, outside the instance template, so no
//! template guard applies.

use vmgate_contracts::{machine::MachineSnapshot, token::GrantToken};
use vmgate_core::traits::FieldChecker;

/// Detects and erases changes to start/stop intent.
pub struct LifecycleChecker;

impl FieldChecker for LifecycleChecker {
    fn name(&self) -> &'static str {
        "lifecycle"
    }

    fn token(&self) -> GrantToken {
        GrantToken::Lifecycle
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        old.spec.running != new.spec.running || old.spec.run_strategy != new.spec.run_strategy
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        old.spec.running = None;
        new.spec.running = None;

        old.spec.run_strategy = None;
        new.spec.run_strategy = None;
    }
}
