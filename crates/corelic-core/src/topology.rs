//! Topology mutation — relocating a VM between hosts.
//!
//! The allocation engine never mutates the topology; this is the one
//! operation callers use to change it between recalculations.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::{LicensingMode, Topology};

/// A position in a host's VM list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSlot {
    pub host_id: String,
    pub index: usize,
}

impl VmSlot {
    pub fn new(host_id: impl Into<String>, index: usize) -> Self {
        Self {
            host_id: host_id.into(),
            index,
        }
    }
}

/// Result of a successful move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The VM now lives on the destination host.
    Moved { vm_id: String },
    /// Source and destination host are the same; nothing changed.
    Unchanged,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("moving VMs is disabled in {0} mode")]
    MovesDisabled(LicensingMode),

    #[error("host not found: {0}")]
    HostNotFound(String),

    #[error("no VM at index {index} on host {host_id}")]
    VmIndexOutOfRange { host_id: String, index: usize },
}

/// Move the VM at `from` to `to`.
///
/// Moves are rejected while per-VM licensing governs. Moving within one
/// host is a no-op. The destination index is clamped to the end of the
/// destination list.
pub fn move_vm(
    topology: &mut Topology,
    mode: LicensingMode,
    from: &VmSlot,
    to: &VmSlot,
) -> Result<MoveOutcome, TopologyError> {
    if mode.is_per_vm() {
        return Err(TopologyError::MovesDisabled(mode));
    }

    for host_id in [&from.host_id, &to.host_id] {
        if !topology.contains(host_id) {
            return Err(TopologyError::HostNotFound(host_id.clone()));
        }
    }

    if from.host_id == to.host_id {
        return Ok(MoveOutcome::Unchanged);
    }

    let source = topology
        .get_mut(&from.host_id)
        .ok_or_else(|| TopologyError::HostNotFound(from.host_id.clone()))?;
    if from.index >= source.vms.len() {
        return Err(TopologyError::VmIndexOutOfRange {
            host_id: from.host_id.clone(),
            index: from.index,
        });
    }
    let vm = source.vms.remove(from.index);
    let vm_id = vm.id.clone();

    let dest = topology
        .get_mut(&to.host_id)
        .ok_or_else(|| TopologyError::HostNotFound(to.host_id.clone()))?;
    let at = to.index.min(dest.vms.len());
    dest.vms.insert(at, vm);

    debug!(
        vm = %vm_id,
        from = %from.host_id,
        to = %to.host_id,
        index = at,
        "moved VM"
    );

    Ok(MoveOutcome::Moved { vm_id })
}
