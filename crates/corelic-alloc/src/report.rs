//! Human-readable report formatting.

use corelic_core::Topology;

use crate::position::CompliancePosition;

pub fn format_report(position: &CompliancePosition, topology: &Topology, show_vm_cores: bool) -> String {
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Windows Server License Calculator       ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Mode:              {:<21}║\n", position.mode.label()));
    out.push_str(&format!(
        "║  Total Cores Used:  {:<21}║\n",
        position.allocation.total_cores_used
    ));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str("License Entitlements:\n");
    out.push_str(&format!(
        "  Windows Server Datacenter Core Licenses: {} cores\n",
        position.pool.datacenter
    ));
    out.push_str(&format!(
        "  Windows Server Standard Core Licenses:   {} cores\n\n",
        position.pool.standard
    ));

    let marker = if position.gap.is_compliant() { "✅" } else { "❌" };
    out.push_str(&format!("{marker} Compliance Position:\n"));
    out.push_str(&format!(
        "  Datacenter Core Licenses Needed: {}\n",
        position.gap.datacenter_gap_cores
    ));
    out.push_str(&format!(
        "  Standard Core Licenses Needed:   {}\n\n",
        position.gap.standard_gap_cores
    ));

    for host in topology.hosts() {
        let record = position.allocation.record(&host.id).copied().unwrap_or_default();
        out.push_str(&format!("{} ({} cores)\n", host.name, host.cores));
        out.push_str(&format!(
            "  Required Cores: {} Datacenter cores, {} Standard cores\n",
            record.datacenter_used, record.standard_used
        ));
        for vm in &host.vms {
            if show_vm_cores {
                out.push_str(&format!("    • {} – {} cores\n", vm.id, vm.cores));
            } else {
                out.push_str(&format!("    • {}\n", vm.id));
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::compute_position;
    use corelic_core::{Host, LicensePool, LicensingMode, VirtualMachine};

    fn topology() -> Topology {
        [Host::new("h1", 48).with_vms(vec![VirtualMachine::new("vm1", 4)])]
            .into_iter()
            .collect()
    }

    #[test]
    fn renders_host_usage_and_gaps() {
        let topology = topology();
        let position = compute_position(&topology, LicensePool::new(10, 30), LicensingMode::HostLevel);
        let text = format_report(&position, &topology, true);

        assert!(text.contains("h1 (48 cores)"));
        assert!(text.contains("Required Cores: 30 Datacenter cores, 18 Standard cores"));
        assert!(text.contains("Datacenter Core Licenses Needed: 18"));
        assert!(text.contains("Standard Core Licenses Needed:   8"));
        assert!(text.contains("vm1 – 4 cores"));
    }

    #[test]
    fn hides_vm_cores_when_toggled_off() {
        let topology = topology();
        let position = compute_position(&topology, LicensePool::default(), LicensingMode::HostLevel);
        let text = format_report(&position, &topology, false);

        assert!(text.contains("• vm1\n"));
        assert!(!text.contains("vm1 –"));
    }
}
