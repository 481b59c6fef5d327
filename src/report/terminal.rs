use colored::Colorize;
use std::fmt::Write;

use crate::similarity::{MatchCandidate, MatchReport, MatchType};

use super::json::round2;

const TOP_MATCHES: usize = 5;

/// Formats the report for terminal display.
#[must_use]
pub fn format_terminal<S, T>(report: &MatchReport, sources: &[S], targets: &[T]) -> String
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut out = String::new();

    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    let _ = writeln!(out, "{}", " MESSAGE SIMILARITY REPORT ".cyan().bold());
    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    let _ = writeln!(out);

    write_summary(&mut out, report);

    let top = report.top(TOP_MATCHES);
    if top.is_empty() {
        let _ = writeln!(out, "{}", "No matches above the minimum score.".yellow());
    } else {
        let _ = writeln!(out, "{}", "TOP MATCHES".cyan().bold());
        let _ = writeln!(out);
        for (rank, (source_index, candidate)) in top.iter().enumerate() {
            write_match(&mut out, rank + 1, *source_index, candidate, sources, targets);
        }
    }

    let _ = writeln!(out, "{}", "─".repeat(70).dimmed());
    out
}

fn write_summary(out: &mut String, report: &MatchReport) {
    let _ = writeln!(out, "{}", "SUMMARY".cyan().bold());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "   Source patterns:   {}",
        report.sources.len().to_string().white()
    );
    let _ = writeln!(
        out,
        "   Target patterns:   {}",
        report.target_count.to_string().white()
    );
    let _ = writeln!(
        out,
        "   Matched sources:   {}",
        format_count(report.matched_sources())
    );
    let _ = writeln!(
        out,
        "   Total matches:     {}",
        format_count(report.total_matches())
    );
    let _ = writeln!(
        out,
        "   Match rate:        {:.1}%",
        report.match_rate()
    );
    let _ = writeln!(out);
}

fn format_count(n: usize) -> String {
    if n == 0 {
        "0".dimmed().to_string()
    } else {
        n.to_string().yellow().to_string()
    }
}

fn write_match<S, T>(
    out: &mut String,
    rank: usize,
    source_index: usize,
    candidate: &MatchCandidate,
    sources: &[S],
    targets: &[T],
) where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let kind = match candidate.match_type {
        MatchType::Exact => candidate.match_type.label().green(),
        MatchType::FormatSpecifierMatch | MatchType::ReverseFormatSpecifierMatch => {
            candidate.match_type.label().cyan()
        }
        MatchType::SourceInTarget | MatchType::TargetInSource => {
            candidate.match_type.label().yellow()
        }
    };
    let source = sources.get(source_index).map_or("", AsRef::as_ref);
    let target = targets
        .get(candidate.target_index)
        .map_or("", AsRef::as_ref);

    let _ = writeln!(
        out,
        "{}. [{}] {}",
        rank,
        kind,
        format!("{:.2}", round2(candidate.score)).white().bold()
    );
    let _ = writeln!(out, "   source #{source_index}: {source}");
    let _ = writeln!(out, "   target #{}: {target}", candidate.target_index);
    let _ = writeln!(out);
}
