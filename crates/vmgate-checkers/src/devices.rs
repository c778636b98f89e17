//! The devices checker.
//!
//! Footprint: GPUs, host device passthrough, watchdog, TPM, and input
//! devices. Disks, interfaces, and filesystems are deliberately excluded —
//! those belong to the storage and network checkers.

use vmgate_contracts::{machine::MachineSnapshot, token::GrantToken};
use vmgate_core::traits::FieldChecker;

/// Detects and erases changes to passthrough and auxiliary devices.
pub struct DevicesChecker;

impl FieldChecker for DevicesChecker {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn token(&self) -> GrantToken {
        GrantToken::Devices
    }

    fn has_changed(&self, old: &MachineSnapshot, new: &MachineSnapshot) -> bool {
        let (Some(old_t), Some(new_t)) = (&old.spec.template, &new.spec.template) else {
            return false;
        };

        let old_d = &old_t.domain.devices;
        let new_d = &new_t.domain.devices;

        old_d.gpus != new_d.gpus
            || old_d.host_devices != new_d.host_devices
            || old_d.watchdog != new_d.watchdog
            || old_d.tpm != new_d.tpm
            || old_d.inputs != new_d.inputs
    }

    fn neutralize(&self, old: &mut MachineSnapshot, new: &mut MachineSnapshot) {
        let (Some(old_t), Some(new_t)) = (&mut old.spec.template, &mut new.spec.template) else {
            return;
        };

        old_t.domain.devices.gpus.clear();
        new_t.domain.devices.gpus.clear();

        old_t.domain.devices.host_devices.clear();
        new_t.domain.devices.host_devices.clear();

        old_t.domain.devices.watchdog = None;
        new_t.domain.devices.watchdog = None;

        old_t.domain.devices.tpm = None;
        new_t.domain.devices.tpm = None;

        old_t.domain.devices.inputs.clear();
        new_t.domain.devices.inputs.clear();
    }
}
