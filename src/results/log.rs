//! Circuit score extraction from the compiler log
//!
//! The overall simulated-annealing score only ever reaches stdout, so it is
//! scraped from the log line carrying [`DEFAULT_SCORE_MARKER`].

use crate::error::{CelloError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_SCORE_MARKER: &str = "SimulatedAnnealing - Score:";

/// Which marker line wins when the log holds several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDirection {
    /// First matching line from the top of the file
    #[default]
    First,
    /// Last matching line; intermediate annealing scores come earlier
    Last,
}

impl std::str::FromStr for ScanDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(ScanDirection::First),
            "last" => Ok(ScanDirection::Last),
            other => Err(format!("'{}' is not a scan direction (first, last)", other)),
        }
    }
}

/// Find the score line in log text and parse its last token.
pub fn extract_score(
    text: &str,
    marker: &str,
    direction: ScanDirection,
    origin: &Path,
) -> Result<f64> {
    let mut matching = text.lines().filter(|line| line.contains(marker));
    let line = match direction {
        ScanDirection::First => matching.next(),
        ScanDirection::Last => matching.last(),
    }
    .ok_or_else(|| CelloError::ScoreNotFound {
        path: origin.to_path_buf(),
        marker: marker.to_string(),
    })?;

    let token = line.split_whitespace().last().unwrap_or_default();
    token.parse::<f64>().map_err(|_| {
        CelloError::malformed(
            origin.display(),
            None,
            format!("score line `{}` does not end in a number", line.trim()),
        )
    })
}

/// Read a log file and extract its circuit score.
pub fn read_circuit_score(path: &Path, marker: &str, direction: ScanDirection) -> Result<f64> {
    let text = std::fs::read_to_string(path).map_err(|e| CelloError::io(path, e))?;
    let score = extract_score(&text, marker, direction, path)?;
    debug!("Circuit score {} from {} ({:?} match)", score, path.display(), direction);
    Ok(score)
}
