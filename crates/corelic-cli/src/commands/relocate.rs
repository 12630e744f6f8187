use anyhow::Context;
use tracing::info;

use corelic_alloc::compute_position;
use corelic_core::{MoveOutcome, VmSlot, move_vm};

use super::{Snapshot, SnapshotArgs};

pub fn relocate(
    args: &SnapshotArgs,
    vm_id: &str,
    dest_host: &str,
    index: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let mut snapshot = args.load()?;
    apply_move(&mut snapshot, vm_id, dest_host, index)?;

    let position = compute_position(&snapshot.topology, snapshot.pool, snapshot.mode);
    super::print_position(&position, &snapshot, format)
}

/// Move `vm_id` to `dest_host` (appending when `index` is `None`).
pub fn apply_move(
    snapshot: &mut Snapshot,
    vm_id: &str,
    dest_host: &str,
    index: Option<usize>,
) -> anyhow::Result<MoveOutcome> {
    let (source_host, source_index) = snapshot
        .topology
        .find_vm(vm_id)
        .map(|(host, idx)| (host.to_string(), idx))
        .with_context(|| format!("VM not found: {vm_id}"))?;
    let from = VmSlot::new(source_host, source_index);
    let to = VmSlot::new(dest_host, index.unwrap_or(usize::MAX));

    let outcome = move_vm(&mut snapshot.topology, snapshot.mode, &from, &to)
        .with_context(|| format!("cannot move {vm_id} to {dest_host}"))?;

    match &outcome {
        MoveOutcome::Moved { vm_id } => {
            info!(vm = %vm_id, from = %from.host_id, to = %to.host_id, "VM moved");
        }
        MoveOutcome::Unchanged => {
            info!(vm = %vm_id, host = %from.host_id, "VM already on destination host");
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelic_alloc::compute_position;
    use corelic_core::{CorelicConfig, LicensePool, LicensingMode, TopologyError};

    fn sample(mode: LicensingMode) -> Snapshot {
        let mut snapshot = SnapshotArgs::default().apply(&CorelicConfig::scaffold());
        snapshot.mode = mode;
        snapshot
    }

    fn vm_ids(snapshot: &Snapshot, host: &str) -> Vec<String> {
        snapshot
            .topology
            .get(host)
            .unwrap()
            .vms
            .iter()
            .map(|vm| vm.id.clone())
            .collect()
    }

    #[test]
    fn move_appends_and_recomputes() {
        let mut snapshot = sample(LicensingMode::HostLevel);
        let outcome = apply_move(&mut snapshot, "vm11", "Host2", None).unwrap();

        assert_eq!(outcome, MoveOutcome::Moved { vm_id: "vm11".to_string() });
        assert_eq!(vm_ids(&snapshot, "Host1").len(), 10);
        assert_eq!(vm_ids(&snapshot, "Host2").last().map(String::as_str), Some("vm11"));

        // Per-VM demand follows the moved VM.
        let position = compute_position(
            &snapshot.topology,
            LicensePool::new(0, 0),
            LicensingMode::PerVirtualMachine,
        );
        assert_eq!(snapshot.topology.get("Host2").unwrap().vm_cores(), 68 + 16);
        assert_eq!(position.gap.standard_gap_cores, 128);
    }

    #[test]
    fn move_to_explicit_index() {
        let mut snapshot = sample(LicensingMode::HostLevel);
        apply_move(&mut snapshot, "vm1", "Host2", Some(0)).unwrap();

        assert_eq!(vm_ids(&snapshot, "Host2")[0], "vm1");
    }

    #[test]
    fn unknown_vm_is_reported() {
        let mut snapshot = sample(LicensingMode::HostLevel);
        let err = apply_move(&mut snapshot, "vm99", "Host2", None).unwrap_err();

        assert!(err.to_string().contains("VM not found: vm99"));
    }

    #[test]
    fn per_vm_mode_rejects_move() {
        let mut snapshot = sample(LicensingMode::PerVirtualMachine);
        let before = snapshot.topology.clone();
        let err = apply_move(&mut snapshot, "vm1", "Host2", None).unwrap_err();

        assert_eq!(
            err.downcast_ref::<TopologyError>(),
            Some(&TopologyError::MovesDisabled(LicensingMode::PerVirtualMachine))
        );
        assert_eq!(snapshot.topology, before);
    }

    #[test]
    fn relocate_reads_inventory_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corelic.toml");
        std::fs::write(&path, CorelicConfig::scaffold().to_toml_string().unwrap()).unwrap();
        let args = SnapshotArgs {
            config: Some(path.clone()),
            ..Default::default()
        };

        relocate(&args, "vm1", "Host2", None, "json").unwrap();
        assert!(relocate(&args, "vm1", "Nowhere", None, "json").is_err());

        // The inventory on disk is left untouched.
        let config = CorelicConfig::from_file(&path).unwrap();
        assert_eq!(config.hosts[0].vms[0].id, "vm1");
    }
}
