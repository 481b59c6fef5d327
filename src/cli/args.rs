use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "msgscan",
    version,
    about = "Extract message patterns from C/C++ and score drift between baselines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Show debug diagnostics (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Configuration file (default: ./msgscan.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a baseline of message patterns from a file or directory
    Extract(ExtractArgs),
    /// Score a source baseline against a target baseline
    Compare(CompareArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// C/C++ source file or directory
    pub input: PathBuf,
    /// Write the baseline here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Exclude paths containing or glob-matching PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,
    /// Do not apply the built-in directory exclusions
    #[arg(long)]
    pub no_default_excludes: bool,
    /// Abort on the first file or expression that cannot be extracted
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Source baseline (JSON array of strings)
    pub source: PathBuf,
    /// Target baseline (JSON array of strings)
    pub target: PathBuf,
    /// Drop candidates scoring below this value
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,
    /// Keep at most N candidates per source pattern
    #[arg(long, value_name = "N")]
    pub max_matches: Option<usize>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Terminal)]
    pub format: ReportFormat,
    /// Write the report here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
