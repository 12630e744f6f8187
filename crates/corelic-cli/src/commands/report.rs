use corelic_alloc::compute_position;

use super::SnapshotArgs;

pub fn report(args: &SnapshotArgs, format: &str) -> anyhow::Result<()> {
    let snapshot = args.load()?;
    let position = compute_position(&snapshot.topology, snapshot.pool, snapshot.mode);
    super::print_position(&position, &snapshot, format)
}
