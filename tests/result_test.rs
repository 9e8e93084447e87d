//! End-to-end loading of Cello output directories

mod common;

use celloapi::{CelloError, CelloResult, ResultOptions, ScanDirection, ScoreFailure};
use tempfile::tempdir;

#[test]
fn test_loads_complete_output_directory() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");

    let result = CelloResult::load(dir.path()).unwrap();

    assert_eq!(result.logic().len(), 5);
    assert_eq!(result.logic()["$54"], vec![true, true, true, false]);
    assert_eq!(result.activity()["out"], vec![0.002, 0.003, 0.004, 1.95]);

    assert_eq!(result.part_names()["$54"], "P3_PhlF");
    assert_eq!(result.part_names()["out"], "YFP_reporter");
    assert_eq!(result.part_map()["S4_SrpR"], "$55");

    let scores = result.repressor_scores();
    assert_eq!(scores.len(), 2);
    assert!((scores["$54"] - (3.1f64 / 0.021).ln()).abs() < 1e-9);
    assert!((scores["$55"] - 50f64.ln()).abs() < 1e-9);

    assert_eq!(result.circuit_score(), 196.62);
}

#[test]
fn test_last_score_line_when_configured() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");

    let options = ResultOptions {
        score_line: ScanDirection::Last,
        ..Default::default()
    };
    let result = CelloResult::load_with(dir.path(), &options).unwrap();
    assert_eq!(result.circuit_score(), 201.5);
}

#[test]
fn test_empty_directory_reports_missing_logic() {
    let dir = tempdir().unwrap();
    match CelloResult::load(dir.path()) {
        Err(CelloError::MissingFile { pattern, .. }) => assert_eq!(pattern, "*_logic.csv"),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_missing_log_reports_missing_file() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    std::fs::remove_file(dir.path().join("and.log")).unwrap();

    match CelloResult::load(dir.path()) {
        Err(CelloError::MissingFile { pattern, .. }) => assert_eq!(pattern, "*.log"),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_two_runs_in_one_directory_are_ambiguous() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    common::write_output(dir.path(), "nor");

    match CelloResult::load(dir.path()) {
        Err(CelloError::AmbiguousFile { pattern, matches }) => {
            assert_eq!(pattern, "*_logic.csv");
            assert_eq!(matches.len(), 2);
        }
        other => panic!("expected AmbiguousFile, got {other:?}"),
    }
}

#[test]
fn test_key_mismatch_is_inconsistent() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    let trimmed: String = common::ACTIVITY
        .lines()
        .filter(|l| !l.starts_with("b,"))
        .map(|l| format!("{l}\n"))
        .collect();
    std::fs::write(dir.path().join("and_activity.csv"), trimmed).unwrap();

    assert!(matches!(
        CelloResult::load(dir.path()),
        Err(CelloError::InconsistentData(_))
    ));
}

#[test]
fn test_unscorable_repressor_fails_construction() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    let logic = common::LOGIC.replace("$55,1,0,0,0", "$55,1,1,1,1");
    std::fs::write(dir.path().join("and_logic.csv"), logic).unwrap();

    match CelloResult::load(dir.path()) {
        Err(CelloError::ScoreComputation(failures)) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].key, "$55");
            assert_eq!(failures[0].reason, ScoreFailure::NoOffRows);
        }
        other => panic!("expected ScoreComputation, got {other:?}"),
    }
}

#[test]
fn test_netlist_without_trailing_comma_is_malformed() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    let strict = common::NETLIST.trim_end().trim_end_matches(',');
    std::fs::write(dir.path().join("and_outputNetlist.json"), strict).unwrap();

    assert!(matches!(
        CelloResult::load(dir.path()),
        Err(CelloError::MalformedInput { .. })
    ));
}

#[test]
fn test_result_serializes_to_json() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    let result = CelloResult::load(dir.path()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["circuit_score"], 196.62);
    assert_eq!(json["part_names"]["$55"], "S4_SrpR");
    assert_eq!(json["logic"]["out"][3], true);
    assert!(json["repressor_scores"]["$54"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_nan_activity_fails_construction() {
    let dir = tempdir().unwrap();
    common::write_output(dir.path(), "and");
    let activity = common::ACTIVITY.replace("$54,4.2,", "$54,NaN,");
    std::fs::write(dir.path().join("and_activity.csv"), activity).unwrap();

    match CelloResult::load(dir.path()) {
        Err(CelloError::MalformedInput { message, .. }) => {
            assert!(message.contains("`NaN`"), "{message}")
        }
        other => panic!("expected MalformedInput, got {other:?}"),
    }
}
