//! The compute checker.
//!
//! Footprint: guest CPU topology and resource requests/limits.

use vmgate_contracts::{
    machine::{MachineSnapshot, ResourceRequirements},
    token::GrantToken,
};
use vmgate_core::traits::FieldChecker;

/// Detects and erases changes to CPU and resource requirements.
pub struct ComputeChecker;

impl FieldChecker for ComputeChecker {
    fn name(&self) -> &'static str {
        "compute"
    }

    fn token(&self) -> GrantToken {
        GrantToken::Compute
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        let (Some(old_t), Some(new_t)) = (&old.spec.template, &new.spec.template) else {
            return false;
        };

        old_t.domain.cpu != new_t.domain.cpu || old_t.domain.resources != new_t.domain.resources
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        let (Some(old_t), Some(new_t)) = (&mut old.spec.template, &mut new.spec.template) else {
            return;
        };

        old_t.domain.cpu = None;
        new_t.domain.cpu = None;

        old_t.domain.resources = ResourceRequirements::default();
        new_t.domain.resources = ResourceRequirements::default();
    }
}
