//! Result command - print scores for a finished output directory

use anyhow::{Context, Result};
use celloapi::{CelloResult, ResultOptions};
use console::style;
use std::path::Path;

pub fn run(dir: &Path, format: &str, options: &ResultOptions) -> Result<()> {
    let result = CelloResult::load_with(dir, options)
        .with_context(|| format!("Failed to load Cello results from {}", dir.display()))?;

    let output = match format {
        "json" => serde_json::to_string_pretty(&result)?,
        _ => render_text(&result),
    };
    println!("{}", output);
    Ok(())
}

fn render_row<T>(values: &[T], cell: impl Fn(&T) -> String) -> String {
    values.iter().map(cell).collect::<Vec<_>>().join(" ")
}

/// Render a result as a terminal table
pub fn render_text(result: &CelloResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} {}\n",
        style("Cello result").bold(),
        style(result.output_dir().display()).dim()
    ));
    out.push_str(&format!(
        "Circuit score: {}\n\n",
        style(format!("{:.4}", result.circuit_score())).bold()
    ));

    let key_width = result
        .logic()
        .keys()
        .map(|k| k.len())
        .chain(std::iter::once("ENTITY".len()))
        .max()
        .unwrap_or(6);
    let part_width = result
        .part_names()
        .values()
        .map(|p| p.len())
        .chain(std::iter::once("PART".len()))
        .max()
        .unwrap_or(4);

    out.push_str(&format!(
        "{:<key_width$}  {:<part_width$}  {:>8}  {}\n",
        "ENTITY", "PART", "SCORE", "LOGIC / ACTIVITY"
    ));

    for (key, truth) in result.logic() {
        let part = result.part_names().get(key).map(String::as_str).unwrap_or("-");
        let score = result
            .repressor_scores()
            .get(key)
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "-".to_string());
        let levels = result.activity().get(key).map(Vec::as_slice).unwrap_or(&[]);

        out.push_str(&format!(
            "{:<key_width$}  {:<part_width$}  {:>8}  {}\n",
            key,
            part,
            score,
            render_row(truth, |&b| if b { "1".to_string() } else { "0".to_string() })
        ));
        out.push_str(&format!(
            "{:<key_width$}  {:<part_width$}  {:>8}  {}\n",
            "",
            "",
            "",
            render_row(levels, |v| format!("{:.3e}", v))
        ));
    }
    out
}
