pub mod init;
pub mod relocate;
pub mod report;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use corelic_alloc::{CompliancePosition, format_report};
use corelic_core::{CorelicConfig, LicensePool, LicensingMode, Topology, parse_count};

pub const CONFIG_FILE: &str = "corelic.toml";

/// Where the snapshot comes from, plus per-run overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Inventory file (default: ./corelic.toml, else the sample inventory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Licensing mode: host-level or per-vm (default: from the inventory)
    #[arg(short, long)]
    pub mode: Option<LicensingMode>,
    /// Shorthand for --mode per-vm
    #[arg(long, conflicts_with = "mode")]
    pub per_vm: bool,
    /// Standard core licenses owned (raw text, coerced to a count)
    #[arg(long, allow_hyphen_values = true)]
    pub standard: Option<String>,
    /// Datacenter core licenses owned (raw text, coerced to a count)
    #[arg(long, allow_hyphen_values = true)]
    pub datacenter: Option<String>,
    /// Omit per-VM core counts from the text report
    #[arg(long)]
    pub hide_vm_cores: bool,
}

/// A caller-owned snapshot handed to the allocation engine.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub topology: Topology,
    pub pool: LicensePool,
    pub mode: LicensingMode,
    pub show_vm_cores: bool,
}

impl SnapshotArgs {
    pub fn load(&self) -> anyhow::Result<Snapshot> {
        let config = match &self.config {
            Some(path) => CorelicConfig::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => CorelicConfig::from_file(Path::new(CONFIG_FILE))?,
            None => {
                debug!("no {CONFIG_FILE} found, using sample inventory");
                CorelicConfig::scaffold()
            }
        };
        Ok(self.apply(&config))
    }

    /// Merge command-line overrides onto a parsed config.
    pub fn apply(&self, config: &CorelicConfig) -> Snapshot {
        let mut pool = config.pool();
        if let Some(raw) = &self.standard {
            pool.standard = parse_count(raw);
        }
        if let Some(raw) = &self.datacenter {
            pool.datacenter = parse_count(raw);
        }

        let mode = match self.mode {
            Some(mode) => mode,
            None if self.per_vm => LicensingMode::PerVirtualMachine,
            None => config.mode(),
        };

        Snapshot {
            topology: config.topology(),
            pool,
            mode,
            show_vm_cores: config.show_vm_cores && !self.hide_vm_cores,
        }
    }
}

pub fn print_position(
    position: &CompliancePosition,
    snapshot: &Snapshot,
    format: &str,
) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(position)?);
        }
        _ => {
            println!("{}", format_report(position, &snapshot.topology, snapshot.show_vm_cores));
        }
    }
    Ok(())
}
