//! Logic and activity tables
//!
//! Both files are headerless CSV: the first column is the entity key, the
//! remaining columns are one value per truth-table row. Column order is
//! significant, row order is not.

use crate::error::{CelloError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Entity key to expected boolean output per truth-table row
pub type LogicTable = BTreeMap<String, Vec<bool>>;

/// Entity key to simulated expression level per truth-table row
pub type ActivityTable = BTreeMap<String, Vec<f64>>;

/// Keys starting with this character are repressors; the rest are
/// primary inputs and outputs.
pub const REPRESSOR_SENTINEL: char = '$';

pub fn is_repressor(key: &str) -> bool {
    key.starts_with(REPRESSOR_SENTINEL)
}

/// Parse a logic cell. Accepts `true`/`false` in any case and `1`/`0`.
pub fn parse_bool_cell(cell: &str) -> Option<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_float_cell(cell: &str) -> Option<f64> {
    cell.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Parse headerless CSV text into a key-to-row map.
///
/// Blank lines are skipped. Every row must have the width of the first one
/// and keys may not repeat; either violation is reported as malformed input
/// pointing at the start of the offending line.
pub fn parse_table<T>(
    text: &str,
    origin: &str,
    kind: &str,
    parse_cell: impl Fn(&str) -> Option<T>,
) -> Result<BTreeMap<String, Vec<T>>> {
    let mut table = BTreeMap::new();
    let mut width: Option<usize> = None;
    let mut line_start = 0;

    for (line_no, raw) in text.split_inclusive('\n').enumerate() {
        let offset = line_start;
        line_start += raw.len();

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = line.split(',').map(str::trim);
        let key = cells.next().unwrap_or_default();
        if key.is_empty() {
            return Err(CelloError::malformed(
                origin,
                Some(offset),
                format!("line {}: empty entity key", line_no + 1),
            ));
        }

        let mut row = Vec::new();
        for (col, cell) in cells.enumerate() {
            let value = parse_cell(cell).ok_or_else(|| {
                CelloError::malformed(
                    origin,
                    Some(offset),
                    format!(
                        "line {}, column {}: cannot read `{}` as {}",
                        line_no + 1,
                        col + 2,
                        cell,
                        kind
                    ),
                )
            })?;
            row.push(value);
        }

        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(CelloError::malformed(
                    origin,
                    Some(offset),
                    format!(
                        "line {}: expected {} values, found {}",
                        line_no + 1,
                        w,
                        row.len()
                    ),
                ));
            }
            Some(_) => {}
        }

        if table.insert(key.to_string(), row).is_some() {
            return Err(CelloError::malformed(
                origin,
                Some(offset),
                format!("line {}: duplicate entity key `{}`", line_no + 1, key),
            ));
        }
    }

    Ok(table)
}

pub fn load_logic(path: &Path) -> Result<LogicTable> {
    let text = std::fs::read_to_string(path).map_err(|e| CelloError::io(path, e))?;
    let table = parse_table(&text, &path.display().to_string(), "boolean", parse_bool_cell)?;
    debug!("Loaded {} logic rows from {}", table.len(), path.display());
    Ok(table)
}

pub fn load_activity(path: &Path) -> Result<ActivityTable> {
    let text = std::fs::read_to_string(path).map_err(|e| CelloError::io(path, e))?;
    let table = parse_table(&text, &path.display().to_string(), "finite number", parse_float_cell)?;
    debug!("Loaded {} activity rows from {}", table.len(), path.display());
    Ok(table)
}

/// Logic and activity tables that are known to line up.
///
/// Both tables have the same key set, and each key's truth row is as long
/// as its activity row. Checked once, at construction.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitTables {
    logic: LogicTable,
    activity: ActivityTable,
}

impl CircuitTables {
    pub fn new(logic: LogicTable, activity: ActivityTable) -> Result<Self> {
        let only_logic: Vec<&str> = logic
            .keys()
            .filter(|k| !activity.contains_key(*k))
            .map(String::as_str)
            .collect();
        let only_activity: Vec<&str> = activity
            .keys()
            .filter(|k| !logic.contains_key(*k))
            .map(String::as_str)
            .collect();

        if !only_logic.is_empty() || !only_activity.is_empty() {
            return Err(CelloError::InconsistentData(format!(
                "keys only in logic: [{}]; keys only in activity: [{}]",
                only_logic.join(", "),
                only_activity.join(", ")
            )));
        }

        for (key, truth) in &logic {
            let levels = &activity[key];
            if truth.len() != levels.len() {
                return Err(CelloError::InconsistentData(format!(
                    "`{}` has {} logic values but {} activity values",
                    key,
                    truth.len(),
                    levels.len()
                )));
            }
        }

        Ok(Self { logic, activity })
    }

    pub fn logic(&self) -> &LogicTable {
        &self.logic
    }

    pub fn activity(&self) -> &ActivityTable {
        &self.activity
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.logic.keys().map(String::as_str)
    }

    /// Paired truth and activity rows for one key
    pub fn rows(&self, key: &str) -> Option<(&[bool], &[f64])> {
        let truth = self.logic.get(key)?;
        let levels = self.activity.get(key)?;
        Some((truth.as_slice(), levels.as_slice()))
    }

    pub fn repressors(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| is_repressor(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic(rows: &[(&str, &[bool])]) -> LogicTable {
        rows.iter().map(|(k, v)| (k.to_string(), v.to_vec())).collect()
    }

    fn activity(rows: &[(&str, &[f64])]) -> ActivityTable {
        rows.iter().map(|(k, v)| (k.to_string(), v.to_vec())).collect()
    }

    #[test]
    fn test_parse_logic_table() {
        let text = "a,0,0,1,1\n$g1,True,False,true,FALSE\n\n";
        let table = parse_table(text, "and_logic.csv", "boolean", parse_bool_cell).unwrap();
        assert_eq!(table["a"], vec![false, false, true, true]);
        assert_eq!(table["$g1"], vec![true, false, true, false]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_activity_table() {
        let text = "$g1, 5.0, 1.0, 6.0, 5e-1\r\nout,0.1,0.2,0.3,0.4\r\n";
        let table = parse_table(text, "and_activity.csv", "number", parse_float_cell).unwrap();
        assert_eq!(table["$g1"], vec![5.0, 1.0, 6.0, 0.5]);
        assert_eq!(table["out"], vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_bad_cell_points_at_line() {
        let text = "a,1,0\nb,1,maybe\n";
        match parse_table(text, "x_logic.csv", "boolean", parse_bool_cell) {
            Err(CelloError::MalformedInput {
                offset, message, ..
            }) => {
                assert_eq!(offset, Some(6));
                assert!(message.contains("line 2, column 3"));
                assert!(message.contains("`maybe`"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_activity_rejected() {
        for bad in ["NaN", "inf", "-infinity"] {
            let text = format!("$g,{bad},5.0,1.0\n");
            match parse_table(&text, "x_activity.csv", "number", parse_float_cell) {
                Err(CelloError::MalformedInput { message, .. }) => {
                    assert!(message.contains("line 1, column 2"), "{message}");
                }
                other => panic!("expected MalformedInput for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let text = "a,1.0,2.0\nb,1.0\n";
        let err = parse_table(text, "x", "number", parse_float_cell).unwrap_err();
        assert!(err.to_string().contains("expected 2 values, found 1"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let text = "a,1.0\na,2.0\n";
        let err = parse_table(text, "x", "number", parse_float_cell).unwrap_err();
        assert!(err.to_string().contains("duplicate entity key `a`"));
    }

    #[test]
    fn test_key_set_mismatch_is_inconsistent() {
        let l = logic(&[("$g1", &[true, false]), ("in0", &[false, true])]);
        let a = activity(&[("$g1", &[2.0, 1.0])]);
        match CircuitTables::new(l, a) {
            Err(CelloError::InconsistentData(msg)) => {
                assert!(msg.contains("keys only in logic: [in0]"));
            }
            other => panic!("expected InconsistentData, got {other:?}"),
        }
    }

    #[test]
    fn test_row_length_mismatch_is_inconsistent() {
        let l = logic(&[("$g1", &[true, false])]);
        let a = activity(&[("$g1", &[2.0, 1.0, 3.0])]);
        assert!(matches!(
            CircuitTables::new(l, a),
            Err(CelloError::InconsistentData(_))
        ));
    }

    #[test]
    fn test_repressor_filter() {
        let l = logic(&[("$g1", &[true]), ("a", &[true]), ("$g2", &[false])]);
        let a = activity(&[("$g1", &[1.0]), ("a", &[1.0]), ("$g2", &[1.0])]);
        let tables = CircuitTables::new(l, a).unwrap();
        let reps: Vec<&str> = tables.repressors().collect();
        assert_eq!(reps, vec!["$g1", "$g2"]);
        assert_eq!(tables.rows("a"), Some((&[true][..], &[1.0][..])));
    }
}
