//! Configuration for celloapi
//!
//! Loaded from `cello.toml` or `.cellorc.json` in the working directory, or
//! from an explicit `--config` path. Command-line flags override file values.
//!
//! ```toml
//! # cello.toml
//!
//! [query]
//! input_directory = "/home/me/cello/input"
//! output_directory = "/home/me/cello/output"
//! verilog_file = "and.v"
//! compiler_options = "options.csv"
//! input_ucf = "Eco1C1G1T1.UCF.json"
//! input_sensors = "Eco1C1G1T1.input.json"
//! output_device = "Eco1C1G1T1.output.json"
//! logging = false
//! image = "cidarlab/cello-dnacompiler:latest"
//!
//! [result]
//! score_line = "first"   # or "last"
//! score_marker = "SimulatedAnnealing - Score:"
//!
//! [sweep]
//! chassis = ["Eco1C1G1T1", "Eco1C2G2T2", "Eco2C1G3T1"]
//! signals_per_circuit = 2
//! ```

use crate::error::{CelloError, Result};
use crate::query::{QueryConfig, DEFAULT_IMAGE};
use crate::results::ResultOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "cello.toml";
pub const JSON_CONFIG_FILE: &str = ".cellorc.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CelloConfig {
    #[serde(default)]
    pub query: QuerySection,

    #[serde(default)]
    pub result: ResultOptions,

    #[serde(default)]
    pub sweep: SweepSection,
}

/// Query fields as they appear in a config file; any may be unset until the
/// command line fills it in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySection {
    pub input_directory: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub verilog_file: Option<String>,
    pub compiler_options: Option<String>,
    pub input_ucf: Option<String>,
    pub input_sensors: Option<String>,
    pub output_device: Option<String>,
    #[serde(default)]
    pub logging: bool,
    pub image: Option<String>,
}

impl QuerySection {
    /// Overlay `other` onto this section (set fields in `other` win)
    pub fn merge(&mut self, other: QuerySection) {
        if other.input_directory.is_some() {
            self.input_directory = other.input_directory;
        }
        if other.output_directory.is_some() {
            self.output_directory = other.output_directory;
        }
        if other.verilog_file.is_some() {
            self.verilog_file = other.verilog_file;
        }
        if other.compiler_options.is_some() {
            self.compiler_options = other.compiler_options;
        }
        if other.input_ucf.is_some() {
            self.input_ucf = other.input_ucf;
        }
        if other.input_sensors.is_some() {
            self.input_sensors = other.input_sensors;
        }
        if other.output_device.is_some() {
            self.output_device = other.output_device;
        }
        if other.image.is_some() {
            self.image = other.image;
        }
        self.logging |= other.logging;
    }

    /// Build a complete [`QueryConfig`].
    ///
    /// Every file field is required. Directories are made absolute because
    /// docker only mounts absolute paths.
    pub fn resolve(&self) -> Result<QueryConfig> {
        fn required<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T> {
            value.clone().ok_or(CelloError::IncompleteQuery(field))
        }
        fn absolute(path: PathBuf) -> Result<PathBuf> {
            std::path::absolute(&path).map_err(|e| CelloError::io(&path, e))
        }

        Ok(QueryConfig {
            input_directory: absolute(required(&self.input_directory, "input_directory")?)?,
            output_directory: absolute(required(&self.output_directory, "output_directory")?)?,
            verilog_file: required(&self.verilog_file, "verilog_file")?,
            compiler_options: required(&self.compiler_options, "compiler_options")?,
            input_ucf: required(&self.input_ucf, "input_ucf")?,
            input_sensors: required(&self.input_sensors, "input_sensors")?,
            output_device: required(&self.output_device, "output_device")?,
            logging: self.logging,
            image: self
                .image
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepSection {
    /// Chassis names; each expands to `<name>.UCF.json`, `<name>.input.json`
    /// and `<name>.output.json`
    pub chassis: Vec<String>,
    pub signals_per_circuit: usize,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            chassis: Vec::new(),
            signals_per_circuit: 2,
        }
    }
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, `cello.toml` and
/// then `.cellorc.json` are tried in `dir`; a broken discovered file is
/// logged and skipped, and defaults are used when nothing is found.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<CelloConfig> {
    if let Some(path) = explicit {
        return load_file(path);
    }

    for name in [CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
            Err(e) => warn!("Failed to load {}: {}", path.display(), e),
        }
    }

    debug!("No config file found, using defaults");
    Ok(CelloConfig::default())
}

fn load_file(path: &Path) -> Result<CelloConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CelloError::io(path, e))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        serde_json::from_str(&content)
            .map_err(|e| CelloError::Config(format!("{}: {}", path.display(), e)))
    } else {
        toml::from_str(&content)
            .map_err(|e| CelloError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Example config written by `celloapi init`
pub const EXAMPLE_CONFIG: &str = r#"# celloapi configuration

[query]
# Directory holding every input file; mounted into the container
# input_directory = "/path/to/cello/input"
# Results land here; earlier results are archived before each run
# output_directory = "/path/to/cello/output"
verilog_file = "and.v"
compiler_options = "options.csv"
input_ucf = "Eco1C1G1T1.UCF.json"
input_sensors = "Eco1C1G1T1.input.json"
output_device = "Eco1C1G1T1.output.json"
# Stream the compiler's output to the terminal
logging = false
# image = "cidarlab/cello-dnacompiler:latest"

[result]
# Which "SimulatedAnnealing - Score:" line to trust: "first" or "last"
score_line = "first"

[sweep]
chassis = ["Eco1C1G1T1", "Eco1C2G2T2", "Eco2C1G3T1"]
signals_per_circuit = 2
"#;
