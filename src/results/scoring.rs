//! Repressor on/off scoring
//!
//! A repressor is scored by how cleanly its activity separates its on and off
//! states across the truth table:
//!
//! ```text
//! score = ln(low_on / high_off)
//!   low_on   = min activity over rows where the gate's expected output is true
//!   high_off = max activity over rows where it is false
//! ```
//!
//! Positive scores mean every on state sits above every off state.

use super::tables::CircuitTables;
use crate::error::{CelloError, Result, ScoreError, ScoreFailure};
use std::collections::BTreeMap;

/// Repressor key to its on/off score
pub type RepressorScores = BTreeMap<String, f64>;

/// Score one repressor from its paired truth and activity rows.
pub fn score_repressor(truth: &[bool], levels: &[f64]) -> std::result::Result<f64, ScoreFailure> {
    let mut low_on: Option<f64> = None;
    let mut high_off: Option<f64> = None;

    for (&on, &level) in truth.iter().zip(levels) {
        // min/max skip NaN, so a bad sample would otherwise vanish
        if !level.is_finite() {
            return Err(ScoreFailure::NonFiniteLevel(level));
        }
        if on {
            low_on = Some(low_on.map_or(level, |m| m.min(level)));
        } else {
            high_off = Some(high_off.map_or(level, |m| m.max(level)));
        }
    }

    let low_on = low_on.ok_or(ScoreFailure::NoOnRows)?;
    let high_off = high_off.ok_or(ScoreFailure::NoOffRows)?;
    if high_off == 0.0 {
        return Err(ScoreFailure::ZeroHighOff);
    }

    let ratio = low_on / high_off;
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(ScoreFailure::NonPositiveRatio(ratio));
    }
    Ok(ratio.ln())
}

/// Score every repressor, keeping each key's outcome.
///
/// For callers that can live with a partial result set.
pub fn score_each(tables: &CircuitTables) -> BTreeMap<String, std::result::Result<f64, ScoreFailure>> {
    tables
        .repressors()
        .filter_map(|key| {
            let (truth, levels) = tables.rows(key)?;
            Some((key.to_string(), score_repressor(truth, levels)))
        })
        .collect()
}

/// Score every repressor, failing with the full list of keys that could not
/// be scored.
pub fn score_repressors(tables: &CircuitTables) -> Result<RepressorScores> {
    let mut scores = RepressorScores::new();
    let mut failures = Vec::new();

    for (key, outcome) in score_each(tables) {
        match outcome {
            Ok(score) => {
                scores.insert(key, score);
            }
            Err(reason) => failures.push(ScoreError { key, reason }),
        }
    }

    if failures.is_empty() {
        Ok(scores)
    } else {
        Err(CelloError::ScoreComputation(failures))
    }
}
