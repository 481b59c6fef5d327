use serde::Serialize;

use crate::error::Result;
use crate::similarity::{MatchReport, MatchType};

#[derive(Serialize)]
struct SourceEntry<'a> {
    source_index: usize,
    source_line: &'a str,
    match_count: usize,
    target_matches: Vec<TargetEntry<'a>>,
}

#[derive(Serialize)]
struct TargetEntry<'a> {
    target_index: usize,
    target_line: &'a str,
    match_type: MatchType,
    similarity_score: f64,
}

/// Formats the report as a JSON array for machine consumption.
///
/// Sources without a surviving match are left out; scores are rounded to
/// two decimals.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_json<S, T>(report: &MatchReport, sources: &[S], targets: &[T]) -> Result<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let entries: Vec<SourceEntry<'_>> = report
        .sources
        .iter()
        .filter(|s| !s.candidates.is_empty())
        .map(|s| {
            let target_matches: Vec<TargetEntry<'_>> = s
                .candidates
                .iter()
                .map(|c| TargetEntry {
                    target_index: c.target_index,
                    target_line: line_at(targets, c.target_index),
                    match_type: c.match_type,
                    similarity_score: round2(c.score),
                })
                .collect();
            SourceEntry {
                source_index: s.source_index,
                source_line: line_at(sources, s.source_index),
                match_count: target_matches.len(),
                target_matches,
            }
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&entries)?;
    out.push('\n');
    Ok(out)
}

fn line_at<S: AsRef<str>>(lines: &[S], idx: usize) -> &str {
    lines.get(idx).map_or("", AsRef::as_ref)
}

/// Rounds to two decimals for output only.
#[must_use]
pub fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
