// src/report/mod.rs
//! Rendering of similarity reports.

pub mod json;
pub mod terminal;

pub use json::format_json;
pub use terminal::format_terminal;

use crate::error::Result;
use crate::similarity::MatchReport;

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Formats the report according to the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_report<S, T>(
    report: &MatchReport,
    sources: &[S],
    targets: &[T],
    format: ReportFormat,
) -> Result<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    match format {
        ReportFormat::Json => format_json(report, sources, targets),
        ReportFormat::Terminal => Ok(format_terminal(report, sources, targets)),
    }
}
