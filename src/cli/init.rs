//! Init command - write an example proofdrop.toml

use crate::config::{EXAMPLE_CONFIG, TOML_FILENAME};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(TOML_FILENAME);
    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!(
        "\nEdit prices and default chains, then run {}",
        style("proofdrop simulate <address>").cyan()
    );

    Ok(())
}
