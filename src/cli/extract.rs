// src/cli/extract.rs
//! Handler for `msgscan extract`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::args::ExtractArgs;
use crate::baseline::{self, GenerateOptions};
use crate::config::Config;
use crate::discovery::ExcludeSet;

/// Builds a baseline and writes it to the output file or stdout.
///
/// # Errors
/// Returns error if generation fails or the output cannot be written.
pub fn handle(args: &ExtractArgs, config: &Config, verbose: bool) -> Result<()> {
    let mut excludes = config.extract.exclude.clone();
    excludes.extend(args.exclude.iter().cloned());
    let include_defaults = config.extract.default_excludes && !args.no_default_excludes;

    let options = GenerateOptions {
        excludes: ExcludeSet::new(&excludes, include_defaults),
        scan: config.scan_options(args.strict),
    };

    if verbose {
        eprintln!("{}", "Extracting message patterns...".cyan());
        eprintln!("   Input:          {}", args.input.display());
        eprintln!("   Min words:      {}", config.extract.min_words);
        eprintln!("   Comments:       {}", enabled_str(config.extract.comments));
        eprintln!("   Strict:         {}", enabled_str(args.strict));
        eprintln!("   Excludes:       {}", options.excludes.patterns().len());
    }

    let generated = baseline::generate(&args.input, &config.extractor(), &options)
        .with_context(|| format!("Failed to extract from {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            generated
                .baseline
                .save(path)
                .with_context(|| format!("Failed to write baseline {}", path.display()))?;
            print_summary(&generated.stats, path);
        }
        None => print!("{}", generated.baseline.to_json()?),
    }

    Ok(())
}

fn print_summary(stats: &baseline::GenerateStats, path: &Path) {
    eprintln!(
        "{} {} unique patterns from {} files -> {}",
        "✓".green().bold(),
        stats.unique_patterns.to_string().green(),
        stats.files_scanned,
        path.display()
    );
    if stats.files_failed > 0 || stats.extraction_failures > 0 {
        eprintln!(
            "   {} {} files unreadable, {} expressions skipped",
            "!".yellow().bold(),
            stats.files_failed,
            stats.extraction_failures
        );
    }
}

fn enabled_str(enabled: bool) -> String {
    if enabled {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}
