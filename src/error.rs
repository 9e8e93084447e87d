//! Error types shared by the result parser and the query glue

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while driving Cello or reading its output
#[derive(Error, Debug)]
pub enum CelloError {
    #[error("Malformed input in {origin}{}: {message}", offset_suffix(.offset))]
    MalformedInput {
        origin: String,
        offset: Option<usize>,
        message: String,
    },

    #[error("No file matching `{pattern}` in {}. Please check the output directory.", .dir.display())]
    MissingFile { dir: PathBuf, pattern: String },

    #[error("Found {} files matching `{pattern}`: {}", .matches.len(), join_paths(.matches))]
    AmbiguousFile {
        pattern: String,
        matches: Vec<PathBuf>,
    },

    #[error("Logic and activity output do not match: {0}")]
    InconsistentData(String),

    #[error("Unable to score {} repressor(s): {}", .0.len(), join_display(.0))]
    ScoreComputation(Vec<ScoreError>),

    #[error("No line containing `{marker}` in {}", .path.display())]
    ScoreNotFound { path: PathBuf, marker: String },

    #[error("Cannot select signal `{signal}`, available signals: {}", .available.join(", "))]
    UnknownSignal {
        signal: String,
        available: Vec<String>,
    },

    #[error("Unable to submit request, required attribute `{0}` is not set")]
    IncompleteQuery(&'static str),

    #[error("Cello run failed: {0}")]
    ToolFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CelloError>;

impl CelloError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        CelloError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(
        origin: impl fmt::Display,
        offset: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        CelloError::MalformedInput {
            origin: origin.to_string(),
            offset,
            message: message.into(),
        }
    }

    /// Rewrite the offset of a `MalformedInput`; other errors pass through.
    pub(crate) fn map_offset(self, f: impl FnOnce(usize) -> usize) -> Self {
        match self {
            CelloError::MalformedInput {
                origin,
                offset,
                message,
            } => CelloError::MalformedInput {
                origin,
                offset: offset.map(f),
                message,
            },
            other => other,
        }
    }
}

/// Why a single repressor could not be scored
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreFailure {
    /// The truth row has no `true` entries, so there is no lowest-on value
    NoOnRows,
    /// The truth row has no `false` entries, so there is no highest-off value
    NoOffRows,
    /// The highest-off activity is zero
    ZeroHighOff,
    /// `low_on / high_off` is negative or not a number
    NonPositiveRatio(f64),
    /// An activity sample is NaN or infinite
    NonFiniteLevel(f64),
}

impl fmt::Display for ScoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreFailure::NoOnRows => write!(f, "no rows where the gate is on"),
            ScoreFailure::NoOffRows => write!(f, "no rows where the gate is off"),
            ScoreFailure::ZeroHighOff => write!(f, "highest off activity is zero"),
            ScoreFailure::NonPositiveRatio(r) => write!(f, "on/off ratio {} has no logarithm", r),
            ScoreFailure::NonFiniteLevel(v) => write!(f, "activity sample {} is not finite", v),
        }
    }
}

/// Per-key scoring failure
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreError {
    pub key: String,
    pub reason: ScoreFailure,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.reason)
    }
}

impl std::error::Error for ScoreError {}

fn offset_suffix(offset: &Option<usize>) -> String {
    match offset {
        Some(o) => format!(" at byte {}", o),
        None => String::new(),
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_offset() {
        let err = CelloError::malformed("netlist.json", Some(42), "unexpected token");
        assert_eq!(
            err.to_string(),
            "Malformed input in netlist.json at byte 42: unexpected token"
        );

        let err = CelloError::malformed("netlist.json", None, "unexpected token");
        assert_eq!(err.to_string(), "Malformed input in netlist.json: unexpected token");
    }

    #[test]
    fn test_score_computation_lists_every_key() {
        let err = CelloError::ScoreComputation(vec![
            ScoreError {
                key: "$g1".into(),
                reason: ScoreFailure::NoOffRows,
            },
            ScoreError {
                key: "$g2".into(),
                reason: ScoreFailure::ZeroHighOff,
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 repressor(s)"));
        assert!(msg.contains("$g1 (no rows where the gate is off)"));
        assert!(msg.contains("$g2 (highest off activity is zero)"));
    }

    #[test]
    fn test_ambiguous_lists_matches() {
        let err = CelloError::AmbiguousFile {
            pattern: "*.log".into(),
            matches: vec![PathBuf::from("a.log"), PathBuf::from("b.log")],
        };
        assert_eq!(err.to_string(), "Found 2 files matching `*.log`: a.log, b.log");
    }
}
