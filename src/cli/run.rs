//! Run command - compile the configured circuit once

use anyhow::{Context, Result};
use celloapi::config::CelloConfig;
use celloapi::query::CUSTOM_SENSORS_FILE;
use celloapi::CelloQuery;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

pub(super) fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}

pub fn run(config: &CelloConfig, signals: &[String]) -> Result<()> {
    let query_config = config.query.resolve().context("Incomplete query")?;
    let logging = query_config.logging;
    let mut query = CelloQuery::new(query_config);

    if !signals.is_empty() {
        let file = query.set_input_signals(signals, CUSTOM_SENSORS_FILE, true)?;
        println!(
            "{} Selected {} ({})",
            style("✓").green(),
            signals.join(", "),
            style(file).cyan()
        );
    }

    if logging {
        query.run()?;
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(create_spinner_style());
        spinner.set_message("Executing Cello query... (this may take a moment)");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        let outcome = query.run();
        spinner.finish_and_clear();
        outcome?;
    }

    println!(
        "{} Cello query finished, results in {}",
        style("✓").green(),
        style(query.config().output_directory.display()).cyan()
    );
    Ok(())
}
