//! Init command - write an example cello.toml

use anyhow::{Context, Result};
use celloapi::config::{CONFIG_FILE, EXAMPLE_CONFIG};
use console::style;
use std::path::Path;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("!").yellow(),
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
    println!("  Set input_directory and output_directory, then run `celloapi signals`.");
    Ok(())
}
