//! Parameter sweep over chassis and input-signal combinations
//!
//! For each chassis the query is pointed at that chassis' library files,
//! then every `signals_per_circuit`-sized combination of its input signals is
//! compiled and scored. Each combination records its own outcome, so a
//! failed placement is reported with its reason instead of being dropped.

use crate::error::{CelloError, Result};
use crate::query::{CelloQuery, CompilerRunner, QueryConfig, CUSTOM_SENSORS_FILE};
use crate::results::{CelloResult, ResultOptions};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Sweep {
    pub chassis: Vec<String>,
    pub signals_per_circuit: usize,
    pub result_options: ResultOptions,
}

/// One compiled configuration
#[derive(Debug)]
pub struct SweepOutcome {
    pub chassis: String,
    pub signals: Vec<String>,
    /// Circuit score, or why this configuration produced none
    pub outcome: Result<f64>,
}

#[derive(Debug, Default)]
pub struct SweepReport {
    pub outcomes: Vec<SweepOutcome>,
}

/// Best configuration found by a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestConfiguration {
    pub chassis: String,
    pub signals: Vec<String>,
    pub score: f64,
}

impl SweepReport {
    /// Highest-scoring successful configuration (earliest wins ties)
    pub fn best(&self) -> Option<BestConfiguration> {
        let mut best: Option<BestConfiguration> = None;
        for outcome in &self.outcomes {
            let Ok(score) = outcome.outcome else {
                continue;
            };
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(BestConfiguration {
                    chassis: outcome.chassis.clone(),
                    signals: outcome.signals.clone(),
                    score,
                });
            }
        }
        best
    }

    pub fn failures(&self) -> impl Iterator<Item = &SweepOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_err())
    }
}

/// Every `k`-sized combination of `items`, in lexicographic index order
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let n = items.len();
    if k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i].clone()).collect());

        // Rightmost index that can still move forward
        let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
            return out;
        };
        idx[pos] += 1;
        for j in pos + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

impl Sweep {
    /// `base` supplies directories, verilog, options and image; the chassis
    /// files are swapped in per chassis.
    pub fn run(&self, base: &QueryConfig, runner: &dyn CompilerRunner) -> SweepReport {
        self.run_with_progress(base, runner, |_| {})
    }

    /// Like [`Sweep::run`], calling `on_outcome` after every combination.
    pub fn run_with_progress(
        &self,
        base: &QueryConfig,
        runner: &dyn CompilerRunner,
        mut on_outcome: impl FnMut(&SweepOutcome),
    ) -> SweepReport {
        let mut report = SweepReport::default();

        for chassis in &self.chassis {
            let mut config = base.clone();
            config.input_ucf = format!("{}.UCF.json", chassis);
            config.input_sensors = format!("{}.input.json", chassis);
            config.output_device = format!("{}.output.json", chassis);
            let mut query = CelloQuery::new(config);

            let signals = match query.input_signals() {
                Ok(signals) => signals,
                Err(e) => {
                    warn!("Skipping chassis {}: {}", chassis, e);
                    let outcome = SweepOutcome {
                        chassis: chassis.clone(),
                        signals: Vec::new(),
                        outcome: Err(e),
                    };
                    on_outcome(&outcome);
                    report.outcomes.push(outcome);
                    continue;
                }
            };

            for combo in combinations(&signals, self.signals_per_circuit) {
                info!("Sweeping {} with {:?}", chassis, combo);
                let outcome = SweepOutcome {
                    chassis: chassis.clone(),
                    outcome: self.evaluate(&mut query, &combo, runner),
                    signals: combo,
                };
                query.reset_input_signals();
                on_outcome(&outcome);
                report.outcomes.push(outcome);
            }
        }

        report
    }

    fn evaluate(
        &self,
        query: &mut CelloQuery,
        signals: &[String],
        runner: &dyn CompilerRunner,
    ) -> Result<f64> {
        query.set_input_signals(signals, CUSTOM_SENSORS_FILE, true)?;
        query.run_with(runner)?;
        let result = CelloResult::load_with(&query.config().output_directory, &self.result_options)?;
        Ok(result.circuit_score())
    }
}

impl SweepOutcome {
    pub fn error(&self) -> Option<&CelloError> {
        self.outcome.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations() {
        let items = ["LacI", "TetR", "AraC", "HlyIIR"];
        let pairs = combinations(&items, 2);
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], vec!["LacI", "TetR"]);
        assert_eq!(pairs[5], vec!["AraC", "HlyIIR"]);

        assert_eq!(combinations(&items, 4).len(), 1);
        assert_eq!(combinations(&items, 0), vec![Vec::<&str>::new()]);
        assert!(combinations(&items, 5).is_empty());
    }

    #[test]
    fn test_best_skips_failures() {
        let report = SweepReport {
            outcomes: vec![
                SweepOutcome {
                    chassis: "A".into(),
                    signals: vec!["LacI".into()],
                    outcome: Ok(10.0),
                },
                SweepOutcome {
                    chassis: "A".into(),
                    signals: vec!["TetR".into()],
                    outcome: Err(CelloError::ToolFailed("no placement".into())),
                },
                SweepOutcome {
                    chassis: "B".into(),
                    signals: vec!["AraC".into()],
                    outcome: Ok(42.0),
                },
            ],
        };
        let best = report.best().unwrap();
        assert_eq!(best.chassis, "B");
        assert_eq!(best.score, 42.0);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_best_of_empty_report() {
        assert!(SweepReport::default().best().is_none());
    }
}
