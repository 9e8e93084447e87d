//! Locate the single output file behind a glob pattern

use crate::error::{CelloError, Result};
use globset::Glob;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOGIC_PATTERN: &str = "*_logic.csv";
pub const ACTIVITY_PATTERN: &str = "*_activity.csv";
pub const NETLIST_PATTERN: &str = "*_outputNetlist.json";
pub const LOG_PATTERN: &str = "*.log";

/// Find the one regular file in `dir` whose name matches `pattern`.
///
/// Only the top level of `dir` is searched. Zero matches is
/// [`CelloError::MissingFile`]; more than one is [`CelloError::AmbiguousFile`]
/// and is never resolved automatically.
pub fn locate_unique(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let matcher = Glob::new(pattern)
        .map_err(|e| CelloError::Config(format!("bad file pattern `{}`: {}", pattern, e)))?
        .compile_matcher();

    let entries = std::fs::read_dir(dir).map_err(|e| CelloError::io(dir, e))?;
    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CelloError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            matches.push(path);
        }
    }
    matches.sort();

    match matches.len() {
        0 => Err(CelloError::MissingFile {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        }),
        1 => {
            let found = matches.remove(0);
            debug!("{} -> {}", pattern, found.display());
            Ok(found)
        }
        _ => Err(CelloError::AmbiguousFile {
            pattern: pattern.to_string(),
            matches,
        }),
    }
}
