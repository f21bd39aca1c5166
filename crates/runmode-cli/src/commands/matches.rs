//! Match command implementation

use std::io::Write;

use colored::Colorize;
use runmode_core::{Settings, select_best};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct MatchLine<'a> {
    spec: &'a str,
    count: usize,
    best: bool,
}

/// Print the match count of every spec and mark the most specific one.
pub fn run_match(out: &mut dyn Write, settings: &Settings, specs: &[String], json: bool) -> Result<()> {
    let best = select_best(specs.iter().map(String::as_str), settings.run_modes());
    let lines: Vec<MatchLine<'_>> = specs
        .iter()
        .enumerate()
        .map(|(index, spec)| MatchLine {
            spec,
            count: settings.best_match_count(spec),
            best: best.is_some_and(|(best_index, _)| best_index == index),
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &lines)?;
        writeln!(out)?;
        return Ok(());
    }

    if let [line] = lines.as_slice() {
        writeln!(out, "{}", line.count)?;
        return Ok(());
    }

    for line in &lines {
        let marker = if line.best { "*".green().bold() } else { " ".normal() };
        writeln!(out, "{} {:>3}  {}", marker, line.count, line.spec)?;
    }
    if best.is_none() {
        writeln!(out, "{}", "No specification matches the current run modes".dimmed())?;
    }
    Ok(())
}
