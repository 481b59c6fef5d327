// src/similarity/types.rs
//! Match candidates and reports.

use serde::{Deserialize, Serialize};

/// How a source pattern relates to a target pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    FormatSpecifierMatch,
    ReverseFormatSpecifierMatch,
    SourceInTarget,
    TargetInSource,
}

impl MatchType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FormatSpecifierMatch => "format_specifier_match",
            Self::ReverseFormatSpecifierMatch => "reverse_format_specifier_match",
            Self::SourceInTarget => "source_in_target",
            Self::TargetInSource => "target_in_source",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub target_index: usize,
    pub match_type: MatchType,
    /// Score in `[0, 100]`.
    pub score: f64,
}

/// Ranked candidates of one source pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMatches {
    pub source_index: usize,
    pub candidates: Vec<MatchCandidate>,
}

impl SourceMatches {
    #[must_use]
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }
}

/// Candidates for every source pattern, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchReport {
    pub sources: Vec<SourceMatches>,
    pub target_count: usize,
}

impl MatchReport {
    #[must_use]
    pub fn matched_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| !s.candidates.is_empty())
            .count()
    }

    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.sources.iter().map(|s| s.candidates.len()).sum()
    }

    /// Percentage of source patterns with at least one surviving match.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn match_rate(&self) -> f64 {
        if self.sources.is_empty() {
            return 0.0;
        }
        self.matched_sources() as f64 / self.sources.len() as f64 * 100.0
    }

    /// The `n` best `(source_index, candidate)` pairs overall, best first.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(usize, MatchCandidate)> {
        let mut all: Vec<_> = self
            .sources
            .iter()
            .flat_map(|s| s.candidates.iter().map(move |c| (s.source_index, *c)))
            .collect();
        all.sort_by(|a, b| {
            b.1.score
                .total_cmp(&a.1.score)
                .then(a.0.cmp(&b.0))
                .then(a.1.target_index.cmp(&b.1.target_index))
        });
        all.truncate(n);
        all
    }
}

/// Knobs of the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    pub min_score: f64,
    pub max_matches: usize,
    /// Multiplier applied to containment scores.
    pub boost: f64,
    /// Upper bound of containment scores.
    pub cap: f64,
    pub placeholder: String,
}

pub const DEFAULT_MIN_SCORE: f64 = 70.0;
pub const DEFAULT_MAX_MATCHES: usize = 5;
pub const DEFAULT_BOOST: f64 = 1.5;
pub const DEFAULT_CAP: f64 = 90.0;

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_matches: DEFAULT_MAX_MATCHES,
            boost: DEFAULT_BOOST,
            cap: DEFAULT_CAP,
            placeholder: crate::extract::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}
