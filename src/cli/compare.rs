// src/cli/compare.rs
//! Handler for `msgscan compare`.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use super::args::CompareArgs;
use crate::baseline::{atomic_write, load_lines};
use crate::config::Config;
use crate::report;
use crate::similarity;

/// Loads both baselines, scores them and renders the report.
///
/// # Errors
/// Returns error on invalid settings, malformed baselines or write failure.
pub fn handle(args: &CompareArgs, config: &Config, verbose: bool) -> Result<()> {
    let mut config = config.clone();
    if let Some(min_score) = args.min_score {
        config.matching.min_score = min_score;
    }
    if let Some(max_matches) = args.max_matches {
        config.matching.max_matches = max_matches;
    }
    config.validate()?;
    let options = config.match_options();

    let sources = load_lines(&args.source)?;
    let targets = load_lines(&args.target)?;

    if verbose {
        eprintln!("{}", "Comparing message baselines...".cyan());
        eprintln!("   Source:       {} ({} patterns)", args.source.display(), sources.len());
        eprintln!("   Target:       {} ({} patterns)", args.target.display(), targets.len());
        eprintln!("   Min score:    {}", options.min_score);
        eprintln!("   Max matches:  {}", options.max_matches);
    }

    let report = similarity::find_matches(&sources, &targets, &options);
    info!(
        matched = report.matched_sources(),
        total = report.total_matches(),
        "comparison finished"
    );

    if args.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = report::format_report(&report, &sources, &targets, args.format)?;
    match &args.output {
        Some(path) => {
            atomic_write(path, &rendered)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            eprintln!(
                "{} {} matched sources -> {}",
                "✓".green().bold(),
                report.matched_sources(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
