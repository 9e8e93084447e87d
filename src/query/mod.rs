//! Driving one Cello compilation
//!
//! [`QueryConfig`] names every file the compiler needs. [`CelloQuery`] wraps
//! it with the operations a parameter sweep needs between runs: picking input
//! signals, archiving the previous run's output, and launching the compiler.

pub mod runner;
pub mod sensors;

pub use runner::{CompilerRunner, DockerRunner};
pub use sensors::SensorLibrary;

use crate::error::{CelloError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_IMAGE: &str = "cidarlab/cello-dnacompiler:latest";

/// Default filename for a pruned sensor file
pub const CUSTOM_SENSORS_FILE: &str = "custom_input.input.json";

/// Archive directories in the output directory start with this
pub const ARCHIVE_PREFIX: &str = "prior_cello_result";

/// Inputs for one compiler run.
///
/// File fields are names relative to `input_directory`, which is mounted
/// into the container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryConfig {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    /// Verilog description of the circuit
    pub verilog_file: String,
    /// Compiler options CSV
    pub compiler_options: String,
    /// User constraint file: the chassis the circuit goes into
    pub input_ucf: String,
    /// Input sensor library
    pub input_sensors: String,
    /// Output device library (usually a fluorescent reporter)
    pub output_device: String,
    /// Stream the container's output to the terminal
    pub logging: bool,
    pub image: String,
}

impl QueryConfig {
    pub fn sensor_path(&self) -> PathBuf {
        self.input_directory.join(&self.input_sensors)
    }
}

/// A query plus the sensor file it started with
#[derive(Debug, Clone)]
pub struct CelloQuery {
    config: QueryConfig,
    original_sensors: String,
}

impl CelloQuery {
    pub fn new(config: QueryConfig) -> Self {
        let original_sensors = config.input_sensors.clone();
        Self {
            config,
            original_sensors,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Human-readable input signal names in the current sensor file
    pub fn input_signals(&self) -> Result<Vec<String>> {
        Ok(SensorLibrary::load(&self.config.sensor_path())?.input_signals())
    }

    /// Write a sensor file holding only `signals` to
    /// `input_directory/output_filename`.
    ///
    /// Every signal must exist in the current sensor file. With `mutate` the
    /// query switches to the new file. Returns the filename.
    pub fn set_input_signals<S: AsRef<str>>(
        &mut self,
        signals: &[S],
        output_filename: &str,
        mutate: bool,
    ) -> Result<String> {
        sensors::write_selection(
            &self.config.input_directory,
            &self.config.input_sensors,
            signals,
            output_filename,
        )?;

        if mutate {
            self.config.input_sensors = output_filename.to_string();
        }
        Ok(output_filename.to_string())
    }

    /// Point the query back at the sensor file it was created with
    pub fn reset_input_signals(&mut self) {
        self.config.input_sensors = self.original_sensors.clone();
    }

    /// Whether the output directory holds a previous run.
    ///
    /// Archive directories don't count, and neither does a single stray
    /// entry.
    pub fn has_prior_results(&self) -> Result<bool> {
        Ok(prior_entries(&self.config.output_directory)?.len() > 1)
    }

    /// Move everything except earlier archives into a fresh
    /// `prior_cello_result_<timestamp>` directory and return its path.
    pub fn archive_prior_results(&self) -> Result<PathBuf> {
        let out_dir = &self.config.output_directory;
        let entries = prior_entries(out_dir)?;

        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S%.6f");
        let archive = out_dir.join(format!("{}_{}", ARCHIVE_PREFIX, stamp));
        std::fs::create_dir(&archive).map_err(|e| CelloError::io(&archive, e))?;

        for entry in entries {
            let Some(name) = entry.file_name() else {
                continue;
            };
            let dest = archive.join(name);
            std::fs::rename(&entry, &dest).map_err(|e| CelloError::io(&entry, e))?;
        }
        Ok(archive)
    }

    /// Archive any previous output, then run the compiler once through docker.
    pub fn run(&self) -> Result<()> {
        self.run_with(&DockerRunner::default())
    }

    pub fn run_with(&self, runner: &dyn CompilerRunner) -> Result<()> {
        if self.has_prior_results()? {
            let dest = self.archive_prior_results()?;
            info!("Prior results detected, moved to {}", dest.display());
        }
        runner.run(&self.config)
    }
}

fn prior_entries(out_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(out_dir).map_err(|e| CelloError::io(out_dir, e))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CelloError::io(out_dir, e))?;
        if entry.file_name().to_string_lossy().contains(ARCHIVE_PREFIX) {
            continue;
        }
        found.push(entry.path());
    }
    found.sort();
    Ok(found)
}
