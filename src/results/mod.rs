//! Typed view over one Cello output directory
//!
//! A [`CelloResult`] is built in one go from a finished output directory:
//!
//! - `*_logic.csv` and `*_activity.csv` become [`CircuitTables`]
//! - `*_outputNetlist.json` (relaxed JSON with a trailing comma) gives the
//!   part names of every entity
//! - repressors are scored from the tables
//! - `*.log` gives the overall circuit score
//!
//! Construction is all-or-nothing. The output directory must be complete
//! and no longer written to by the compiler.

pub mod files;
pub mod log;
pub mod netlist;
pub mod scoring;
pub mod tables;

pub use log::{ScanDirection, DEFAULT_SCORE_MARKER};
pub use netlist::PartNameMap;
pub use scoring::RepressorScores;
pub use tables::{ActivityTable, CircuitTables, LogicTable};

use crate::error::Result;
use crate::relaxed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// How to read the log score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultOptions {
    pub score_line: ScanDirection,
    pub score_marker: String,
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            score_line: ScanDirection::First,
            score_marker: DEFAULT_SCORE_MARKER.to_string(),
        }
    }
}

/// Everything parsed out of one output directory. Read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct CelloResult {
    output_dir: PathBuf,
    #[serde(flatten)]
    tables: CircuitTables,
    part_names: PartNameMap,
    repressor_scores: RepressorScores,
    circuit_score: f64,
}

impl CelloResult {
    /// Load with default options (first score line in the log)
    pub fn load(output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(output_dir, &ResultOptions::default())
    }

    pub fn load_with(output_dir: impl AsRef<Path>, options: &ResultOptions) -> Result<Self> {
        let output_dir = output_dir.as_ref();

        let logic = tables::load_logic(&files::locate_unique(output_dir, files::LOGIC_PATTERN)?)?;
        let activity =
            tables::load_activity(&files::locate_unique(output_dir, files::ACTIVITY_PATTERN)?)?;
        let tables = CircuitTables::new(logic, activity)?;

        let netlist_path = files::locate_unique(output_dir, files::NETLIST_PATTERN)?;
        let netlist = relaxed::read_file(&netlist_path, true)?;
        let part_names = netlist::resolve_part_names(
            &netlist,
            tables.keys(),
            &netlist_path.display().to_string(),
        )?;

        let repressor_scores = scoring::score_repressors(&tables)?;

        let log_path = files::locate_unique(output_dir, files::LOG_PATTERN)?;
        let circuit_score =
            log::read_circuit_score(&log_path, &options.score_marker, options.score_line)?;

        info!(
            "Loaded {} entities ({} repressors) from {}, circuit score {}",
            tables.logic().len(),
            repressor_scores.len(),
            output_dir.display(),
            circuit_score
        );

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            tables,
            part_names,
            repressor_scores,
            circuit_score,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Expected boolean state per truth-table row, by entity key
    pub fn logic(&self) -> &LogicTable {
        self.tables.logic()
    }

    /// Simulated activity per truth-table row, by entity key
    pub fn activity(&self) -> &ActivityTable {
        self.tables.activity()
    }

    pub fn tables(&self) -> &CircuitTables {
        &self.tables
    }

    /// Entity key to biological part name (e.g. `$54 -> PhlF`)
    pub fn part_names(&self) -> &PartNameMap {
        &self.part_names
    }

    /// Part name to entity key
    pub fn part_map(&self) -> BTreeMap<String, String> {
        netlist::invert(&self.part_names)
    }

    pub fn repressor_scores(&self) -> &RepressorScores {
        &self.repressor_scores
    }

    /// Overall circuit score reported by simulated annealing
    pub fn circuit_score(&self) -> f64 {
        self.circuit_score
    }
}
