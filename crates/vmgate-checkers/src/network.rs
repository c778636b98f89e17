//! The network checker.
//!
//! Footprint: network interface attachments and network definitions.
//! Independent of every other checker's footprint.

use vmgate_contracts::{machine::MachineSnapshot, token::GrantToken};
use vmgate_core::traits::FieldChecker;

/// Detects and erases changes to interfaces and networks.
pub struct NetworkChecker;

impl FieldChecker for NetworkChecker {
    fn name(&self) -> &'static str {
        "network"
    }

    fn token(&self) -> GrantToken {
        GrantToken::Network
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        let (Some(old_t), Some(new_t)) = (&old.spec.template, &new.spec.template) else {
            return false;
        };

        old_t.domain.devices.interfaces != new_t.domain.devices.interfaces
            || old_t.networks != new_t.networks
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        let (Some(old_t), Some(new_t)) = (&mut old.spec.template, &mut new.spec.template) else {
            return;
        };

        old_t.domain.devices.interfaces.clear();
        new_t.domain.devices.interfaces.clear();

        old_t.networks.clear();
        new_t.networks.clear();
    }
}
