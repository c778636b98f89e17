//! Shared builders for checker tests.

use vmgate_contracts::machine::{
    InstanceTemplate, MachineSnapshot, MachineSpec, ObjectMeta,
};

/// Build a snapshot with an empty template, then let the caller shape it.
pub(crate) fn machine_with_template(
    build: impl FnOnce(&mut InstanceTemplate),
) -> MachineSnapshot {
    let mut template = InstanceTemplate::default();
    build(&mut template);

    MachineSnapshot::new(
        ObjectMeta::named("vm-a", "default"),
        MachineSpec {
            running: None,
            run_strategy: None,
            template: Some(template),
        },
    )
}
