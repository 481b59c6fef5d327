// src/similarity/mod.rs
//! Similarity classification and scoring.
//!
//! For every source pattern, each target pattern is run through a fixed
//! ladder of match rules:
//! - **Exact**: equal after case-fold and whitespace collapse (100)
//! - **Format specifier**: literal words of the side carrying placeholders
//!   found in order on the other side
//! - **Containment**: one word sequence is a contiguous run of the other,
//!   boosted and capped below the exact score
//!
//! Candidates under the minimum score are dropped before the per-source
//! truncation. The engine is pure; sources are scored in parallel and
//! reassembled in order.

pub mod ladder;
pub mod tokens;
pub mod types;

pub use types::{MatchCandidate, MatchOptions, MatchReport, MatchType, SourceMatches};

use ladder::Prepared;
use rayon::prelude::*;

/// Scores every source pattern against every target pattern.
#[must_use]
pub fn find_matches<S, T>(sources: &[S], targets: &[T], options: &MatchOptions) -> MatchReport
where
    S: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    let prepared: Vec<Prepared> = targets
        .par_iter()
        .map(|t| Prepared::new(t.as_ref(), &options.placeholder))
        .collect();

    let sources = sources
        .par_iter()
        .enumerate()
        .map(|(source_index, source)| {
            let src = Prepared::new(source.as_ref(), &options.placeholder);
            let candidates = prepared
                .iter()
                .enumerate()
                .filter_map(|(target_index, tgt)| {
                    ladder::classify_pair(&src, tgt, options).map(|(match_type, score)| {
                        MatchCandidate {
                            target_index,
                            match_type,
                            score,
                        }
                    })
                })
                .collect();
            SourceMatches {
                source_index,
                candidates: ladder::rank(candidates, options),
            }
        })
        .collect();

    MatchReport {
        sources,
        target_count: targets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_source_order_and_every_source() {
        let sources = ["disk full", "nothing matches this one", "disk"];
        let targets = ["Disk full", "the disk is almost full"];
        let report = find_matches(&sources, &targets, &MatchOptions {
            min_score: 0.0,
            ..MatchOptions::default()
        });
        let order: Vec<_> = report.sources.iter().map(|s| s.source_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(report.sources[0].best().map(|c| c.match_type), Some(MatchType::Exact));
        assert!(report.sources[1].candidates.is_empty());
        assert_eq!(report.matched_sources(), 2);
    }

    #[test]
    fn test_ties_break_by_target_index() {
        let sources = ["disk full"];
        let targets = ["b", "disk full", "DISK FULL"];
        let report = find_matches(&sources, &targets, &MatchOptions::default());
        let idx: Vec<_> = report.sources[0]
            .candidates
            .iter()
            .map(|c| c.target_index)
            .collect();
        assert_eq!(idx, vec![1, 2]);
    }
}
