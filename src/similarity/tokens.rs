// src/similarity/tokens.rs
//! Word-level views of a pattern.

use regex::Regex;
use std::sync::LazyLock;

/// printf-style conversion specifiers. `%%` is matched so it can be skipped.
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"%%|%(?:\d+\$)?[-+#0']*(?:\d+|\*)?(?:\.(?:\d+|\*))?(?:hh|h|ll|l|j|z|t|L|q|I64|I32)?[diouxXeEfFgGaAcspn]",
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Case-folded text with whitespace runs collapsed.
#[must_use]
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-folded words with punctuation removed. Words made only of
/// punctuation are dropped.
#[must_use]
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(clean_word).collect()
}

fn clean_word(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// A pattern split into literal words and a placeholder count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatWords {
    pub literal: Vec<String>,
    pub placeholders: usize,
}

/// Splits `text` into literal words, counting each occurrence of `marker`
/// and each printf specifier as one placeholder. Specifiers are matched
/// first so an escaped `%%` never starts a marker.
#[must_use]
pub fn format_words(text: &str, marker: &str) -> FormatWords {
    let mut placeholders = 0;
    let mut literal_text = String::with_capacity(text.len());
    let mut last = 0;
    for m in SPECIFIER_RE.find_iter(text) {
        placeholders += push_gap(&text[last..m.start()], marker, &mut literal_text);
        if m.as_str() == "%%" {
            literal_text.push('%');
        } else {
            placeholders += 1;
            literal_text.push(' ');
        }
        last = m.end();
    }
    placeholders += push_gap(&text[last..], marker, &mut literal_text);

    FormatWords {
        literal: words(&literal_text),
        placeholders,
    }
}

/// Copies text between specifiers, blanking custom markers. Returns the
/// number of markers found.
fn push_gap(gap: &str, marker: &str, out: &mut String) -> usize {
    if marker.is_empty() {
        out.push_str(gap);
        return 0;
    }
    out.push_str(&gap.replace(marker, " "));
    gap.matches(marker).count()
}

/// True if `needle` occurs as a contiguous run inside `haystack`.
#[must_use]
pub fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && needle.len() <= haystack.len()
        && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Length of the longest common subsequence of two word lists.
#[must_use]
pub fn ordered_overlap(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for wa in a {
        for (j, wb) in b.iter().enumerate() {
            curr[j + 1] = if wa == wb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
