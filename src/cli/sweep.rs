//! Sweep command - try every chassis and signal combination

use super::run::create_spinner_style;
use anyhow::{bail, Context, Result};
use celloapi::config::CelloConfig;
use celloapi::query::DockerRunner;
use celloapi::sweep::Sweep;
use console::style;
use indicatif::ProgressBar;

pub fn run(config: &CelloConfig) -> Result<()> {
    if config.sweep.chassis.is_empty() {
        bail!("No chassis to sweep. Pass --chassis or set [sweep] chassis in cello.toml");
    }
    let base = config.query.resolve().context("Incomplete query")?;
    let sweep = Sweep {
        chassis: config.sweep.chassis.clone(),
        signals_per_circuit: config.sweep.signals_per_circuit,
        result_options: config.result.clone(),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message("Sweeping...");

    let report = sweep.run_with_progress(&base, &DockerRunner::default(), |outcome| {
        let line = match &outcome.outcome {
            Ok(score) => format!(
                "{} {:<12} {:<30} {:.4}",
                style("✓").green(),
                outcome.chassis,
                outcome.signals.join(","),
                score
            ),
            Err(e) => format!(
                "{} {:<12} {:<30} {}",
                style("✗").red(),
                outcome.chassis,
                outcome.signals.join(","),
                e
            ),
        };
        spinner.println(line);
    });
    spinner.finish_and_clear();

    println!("-----");
    match report.best() {
        Some(best) => {
            println!("Best Score: {}", style(format!("{:.4}", best.score)).bold());
            println!("Best Chassis: {}", best.chassis);
            println!("Best Input Signals: {}", best.signals.join(", "));
        }
        None => println!("{}", style("No configuration produced a score").yellow()),
    }
    let failed = report.failures().count();
    if failed > 0 {
        println!("{} of {} configurations failed", failed, report.outcomes.len());
    }
    Ok(())
}
