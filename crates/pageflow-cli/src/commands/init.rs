use anyhow::{bail, Result};

use pageflow_core::Settings;

/// Write the default configuration file.
pub fn run(force: bool) -> Result<()> {
    let path = Settings::config_path();
    if path.exists() && !force {
        bail!(
            "configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
