//! Input sensor library files
//!
//! A sensor file is a relaxed-JSON sequence of records, each tagged with a
//! `collection`. One logical input signal is spread over three records that
//! share a name prefix:
//!
//! | collection      | name                     |
//! |-----------------|--------------------------|
//! | `input_sensors` | `<signal>_sensor`        |
//! | `models`        | `<signal>_sensor_model`  |
//! | `structures`    | `<signal>_sensor_structure` |
//!
//! Selecting signals means dropping the triplets of every other signal while
//! leaving all remaining records alone.

use crate::error::{CelloError, Result};
use crate::relaxed::{self, RawDocument};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collection name paired with the suffix its record names carry
const SIGNAL_COLLECTIONS: &[(&str, &str)] = &[
    ("input_sensors", "_sensor"),
    ("models", "_sensor_model"),
    ("structures", "_sensor_structure"),
];

fn collection(record: &RawDocument) -> Option<&str> {
    record.get("collection").and_then(|c| c.as_str())
}

fn name(record: &RawDocument) -> Option<&str> {
    record.get("name").and_then(|n| n.as_str())
}

/// Parsed sensor file, records in file order
#[derive(Debug, Clone, PartialEq)]
pub struct SensorLibrary {
    records: Vec<RawDocument>,
}

impl SensorLibrary {
    pub fn from_document(doc: RawDocument, origin: &str) -> Result<Self> {
        match doc {
            RawDocument::Array(records) => Ok(Self { records }),
            _ => Err(CelloError::malformed(
                origin,
                None,
                "sensor file must be a sequence of records",
            )),
        }
    }

    /// Read a sensor file. These files never carry the outer trailing comma.
    pub fn load(path: &Path) -> Result<Self> {
        let doc = relaxed::read_file(path, false)?;
        Self::from_document(doc, &path.display().to_string())
    }

    pub fn records(&self) -> &[RawDocument] {
        &self.records
    }

    /// Signal names, in file order: the part of each `input_sensors`
    /// record's name before the first underscore.
    pub fn input_signals(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| collection(r) == Some("input_sensors"))
            .filter_map(name)
            .map(|n| n.split('_').next().unwrap_or(n).to_string())
            .collect()
    }

    /// Keep only the triplets belonging to `signals`.
    ///
    /// Records outside the three signal collections pass through untouched.
    pub fn retain_signals<S: AsRef<str>>(&self, signals: &[S]) -> Self {
        let records = self
            .records
            .iter()
            .filter(|record| {
                let Some(coll) = collection(record) else {
                    return true;
                };
                let Some((_, suffix)) = SIGNAL_COLLECTIONS.iter().find(|(c, _)| *c == coll) else {
                    return true;
                };
                let record_name = name(record).unwrap_or_default();
                signals
                    .iter()
                    .any(|s| record_name == format!("{}{}", s.as_ref(), suffix))
            })
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            "Pruned sensor library from {} to {} records",
            self.records.len(),
            records.len()
        );
        Self { records }
    }

    /// Write as strict JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| CelloError::io(path, e))?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.records)?;
        writer.flush().map_err(|e| CelloError::io(path, e))
    }
}

/// Write a copy of `input_dir/sensors_file` that holds only `signals` to
/// `input_dir/output_filename` and return the written path.
///
/// Every signal must be present in the source file.
pub fn write_selection<S: AsRef<str>>(
    input_dir: &Path,
    sensors_file: &str,
    signals: &[S],
    output_filename: &str,
) -> Result<PathBuf> {
    let library = SensorLibrary::load(&input_dir.join(sensors_file))?;
    let available = library.input_signals();
    for signal in signals {
        let signal = signal.as_ref();
        if !available.iter().any(|a| a == signal) {
            return Err(CelloError::UnknownSignal {
                signal: signal.to_string(),
                available,
            });
        }
    }

    let out_path = input_dir.join(output_filename);
    library.retain_signals(signals).write(&out_path)?;
    debug!("Wrote pruned sensor file {}", out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn library() -> SensorLibrary {
        let doc = json!([
            {"collection": "input_sensors", "name": "LacI_sensor", "model": "LacI_sensor_model"},
            {"collection": "input_sensors", "name": "TetR_sensor"},
            {"collection": "input_sensors", "name": "AraC_sensor"},
            {"collection": "models", "name": "LacI_sensor_model"},
            {"collection": "models", "name": "TetR_sensor_model"},
            {"collection": "models", "name": "AraC_sensor_model"},
            {"collection": "structures", "name": "LacI_sensor_structure"},
            {"collection": "structures", "name": "TetR_sensor_structure"},
            {"collection": "structures", "name": "AraC_sensor_structure"},
            {"collection": "parts", "name": "pTac", "type": "promoter"},
            {"collection": "functions", "name": "sensor_response"}
        ]);
        SensorLibrary::from_document(doc, "test").unwrap()
    }

    #[test]
    fn test_input_signals() {
        assert_eq!(library().input_signals(), vec!["LacI", "TetR", "AraC"]);
    }

    #[test]
    fn test_retain_keeps_selected_triplets_and_other_records() {
        let pruned = library().retain_signals(&["LacI", "AraC"]);
        let names: Vec<&str> = pruned.records().iter().filter_map(name).collect();
        assert_eq!(
            names,
            vec![
                "LacI_sensor",
                "AraC_sensor",
                "LacI_sensor_model",
                "AraC_sensor_model",
                "LacI_sensor_structure",
                "AraC_sensor_structure",
                "pTac",
                "sensor_response",
            ]
        );
    }

    #[test]
    fn test_prune_then_read_round_trip() {
        let lib = library();
        let available = lib.input_signals();
        for i in 0..available.len() {
            for j in i..available.len() {
                let chosen = vec![available[i].clone(), available[j].clone()];
                let read_back: BTreeSet<String> =
                    lib.retain_signals(&chosen).input_signals().into_iter().collect();
                let expected: BTreeSet<String> = chosen.into_iter().collect();
                assert_eq!(read_back, expected);
            }
        }
        assert!(lib.retain_signals::<&str>(&[]).input_signals().is_empty());
    }

    #[test]
    fn test_non_sequence_rejected() {
        let err = SensorLibrary::from_document(json!({"collection": "models"}), "x").unwrap_err();
        assert!(matches!(err, CelloError::MalformedInput { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_to_full_device_fails() {
        let err = library().write(Path::new("/dev/full")).unwrap_err();
        assert!(matches!(err, CelloError::Io { .. } | CelloError::Json(_)));
    }

    #[test]
    fn test_write_is_strict_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_input.input.json");
        let pruned = library().retain_signals(&["TetR"]);
        pruned.write(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let strict: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(strict.as_array().unwrap().len(), 5);
        assert_eq!(SensorLibrary::load(&path).unwrap(), pruned);
    }
}
