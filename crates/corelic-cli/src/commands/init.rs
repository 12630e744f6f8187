use std::path::Path;

use corelic_core::CorelicConfig;

use super::CONFIG_FILE;

pub fn init(path: &str, force: bool) -> anyhow::Result<()> {
    let output = Path::new(path).join(CONFIG_FILE);
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let config = CorelicConfig::scaffold();
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
