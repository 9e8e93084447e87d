//! Signals commands - list and select input signals

use anyhow::{Context, Result};
use celloapi::config::QuerySection;
use celloapi::query::{sensors, SensorLibrary};
use celloapi::CelloError;
use console::style;
use std::path::PathBuf;

/// Sensor file location from a possibly incomplete query section
fn sensor_source(section: &QuerySection) -> Result<(PathBuf, String)> {
    let dir = section
        .input_directory
        .clone()
        .ok_or(CelloError::IncompleteQuery("input_directory"))?;
    let file = section
        .input_sensors
        .clone()
        .ok_or(CelloError::IncompleteQuery("input_sensors"))?;
    Ok((dir, file))
}

pub fn list(section: &QuerySection) -> Result<()> {
    let (dir, file) = sensor_source(section)?;
    let path = dir.join(&file);
    let library = SensorLibrary::load(&path)
        .with_context(|| format!("Failed to read sensor file {}", path.display()))?;

    for signal in library.input_signals() {
        println!("{}", signal);
    }
    Ok(())
}

pub fn select(section: &QuerySection, signals: &[String], output_file: &str) -> Result<()> {
    let (dir, file) = sensor_source(section)?;
    let written = sensors::write_selection(&dir, &file, signals, output_file)?;
    println!(
        "{} Wrote {} with {}",
        style("✓").green(),
        style(written.display()).cyan(),
        signals.join(", ")
    );
    println!("  Use it with --sensors {}", output_file);
    Ok(())
}
