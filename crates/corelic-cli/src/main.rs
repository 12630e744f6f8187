use clap::{Parser, Subcommand};

mod commands;

use commands::SnapshotArgs;

#[derive(Parser)]
#[command(
    name = "corelic",
    about = "corelic — Windows Server core-license compliance calculator",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-host license usage and the compliance position.
    ///
    /// Reads corelic.toml from the current directory when --config is not
    /// given, falling back to the built-in sample inventory.
    Report {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Move a VM to another host and show the recomputed position.
    ///
    /// The inventory file is not modified. Moves are rejected in per-VM mode.
    Move {
        /// Id of the VM to move
        vm: String,
        /// Destination host id
        #[arg(long)]
        to: String,
        /// Position in the destination host's VM list (default: end)
        #[arg(long)]
        index: Option<usize>,
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a sample corelic.toml
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
        /// Overwrite an existing corelic.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("corelic=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { snapshot, format } => {
            commands::report::report(&snapshot, &format)
        }
        Commands::Move { vm, to, index, snapshot, format } => {
            commands::relocate::relocate(&snapshot, &vm, &to, index, &format)
        }
        Commands::Init { path, force } => {
            commands::init::init(&path, force)
        }
    }
}
