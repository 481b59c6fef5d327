// src/similarity/ladder.rs
//! The match ladder: exact, format-specifier, containment. First rule that
//! applies wins.

use super::tokens::{contains_run, fold, format_words, ordered_overlap, words, FormatWords};
use super::types::{MatchCandidate, MatchOptions, MatchType};

/// A pattern pre-tokenized once for every comparison it takes part in.
#[derive(Debug, Clone)]
pub struct Prepared {
    folded: String,
    words: Vec<String>,
    format: FormatWords,
}

impl Prepared {
    #[must_use]
    pub fn new(text: &str, marker: &str) -> Self {
        Self {
            folded: fold(text),
            words: words(text),
            format: format_words(text, marker),
        }
    }
}

/// Runs the ladder for one pair.
#[must_use]
pub fn classify_pair(
    source: &Prepared,
    target: &Prepared,
    options: &MatchOptions,
) -> Option<(MatchType, f64)> {
    exact(source, target)
        .or_else(|| format_specifier(source, target))
        .or_else(|| containment(source, target, options))
}

fn exact(source: &Prepared, target: &Prepared) -> Option<(MatchType, f64)> {
    (!source.folded.is_empty() && source.folded == target.folded).then_some((MatchType::Exact, 100.0))
}

/// Scores the literal words of the template side against the other side.
///
/// `m` template words are found in order among the other side's words; each
/// template placeholder may absorb one word of the other side:
/// `100 * 2m / (t + max(o - p, m))`.
#[allow(clippy::cast_precision_loss)]
fn format_specifier(source: &Prepared, target: &Prepared) -> Option<(MatchType, f64)> {
    let (src, tgt) = (&source.format, &target.format);
    let source_is_template = match (src.placeholders > 0, tgt.placeholders > 0) {
        (false, false) => return None,
        (true, false) => true,
        (false, true) => false,
        (true, true) => src.literal.len() <= tgt.literal.len(),
    };

    let (template, other, kind) = if source_is_template {
        (src, tgt, MatchType::FormatSpecifierMatch)
    } else {
        (tgt, src, MatchType::ReverseFormatSpecifierMatch)
    };

    let matched = ordered_overlap(&template.literal, &other.literal);
    if matched == 0 {
        return None;
    }
    let unabsorbed = other
        .literal
        .len()
        .saturating_sub(template.placeholders)
        .max(matched);
    let denominator = template.literal.len() + unabsorbed;
    Some((kind, 100.0 * (2 * matched) as f64 / denominator as f64))
}

#[allow(clippy::cast_precision_loss)]
fn containment(
    source: &Prepared,
    target: &Prepared,
    options: &MatchOptions,
) -> Option<(MatchType, f64)> {
    let (src, tgt) = (&source.words, &target.words);
    let kind = if contains_run(tgt, src) {
        MatchType::SourceInTarget
    } else if contains_run(src, tgt) {
        MatchType::TargetInSource
    } else {
        return None;
    };

    let shorter = src.len().min(tgt.len());
    let longer = src.len().max(tgt.len());
    let base = shorter as f64 / longer as f64 * 100.0;
    Some((kind, containment_score(base, options.boost, options.cap)))
}

/// Boosted containment score, bounded by `cap`.
#[must_use]
pub fn containment_score(base: f64, boost: f64, cap: f64) -> f64 {
    (base * boost).min(cap)
}

/// Drops candidates below `min_score`, then keeps the best `max_matches`
/// (score descending, target index ascending).
#[must_use]
pub fn rank(mut candidates: Vec<MatchCandidate>, options: &MatchOptions) -> Vec<MatchCandidate> {
    candidates.retain(|c| c.score >= options.min_score);
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.target_index.cmp(&b.target_index))
    });
    candidates.truncate(options.max_matches);
    candidates
}
