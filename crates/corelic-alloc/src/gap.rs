//! Compliance gap estimation.
//!
//! Re-derives demand from the topology instead of reading the allocator's
//! output. The per-VM formula assumes the pool can be consumed without the
//! allocator's all-or-nothing skipping, so it is an optimistic lower bound
//! on what actually remains uncovered.

use corelic_core::{ComplianceGap, LicensePool, LicensingMode, Topology};

/// Additional units of each kind needed to cover all demand.
pub fn estimate_gaps(topology: &Topology, pool: LicensePool, mode: LicensingMode) -> ComplianceGap {
    match mode {
        LicensingMode::HostLevel => {
            let demand = topology.declared_cores();
            let after_datacenter = demand.saturating_sub(u64::from(pool.datacenter));
            ComplianceGap {
                datacenter_gap_cores: after_datacenter,
                standard_gap_cores: after_datacenter.saturating_sub(u64::from(pool.standard)),
            }
        }
        LicensingMode::PerVirtualMachine => {
            let demand = topology.vm_cores();
            ComplianceGap {
                datacenter_gap_cores: 0,
                standard_gap_cores: demand.saturating_sub(u64::from(pool.standard)),
            }
        }
    }
}
