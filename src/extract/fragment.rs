// src/extract/fragment.rs
//! Pattern text under construction.

use super::Pattern;

/// Accumulates literal text and placeholders for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    literal_content: bool,
}

impl Fragment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_literal(&mut self, text: &str) {
        if text.chars().any(|c| !c.is_whitespace()) {
            self.literal_content = true;
        }
        self.text.push_str(text);
    }

    /// Appends one placeholder for a non-literal sub-expression.
    pub fn push_placeholder(&mut self, marker: &str) {
        self.text.push_str(marker);
    }

    pub fn push_separator(&mut self) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
    }

    /// Appends another fragment in place.
    pub fn append(&mut self, other: &Fragment) {
        self.text.push_str(&other.text);
        self.literal_content |= other.literal_content;
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.text
    }

    /// Normalizes the text into a pattern, or `None` if it carries no
    /// literal content or too few words.
    #[must_use]
    pub fn finish(&self, min_words: usize) -> Option<Pattern> {
        if !self.literal_content {
            return None;
        }
        let normalized = normalize(&self.text);
        if word_count(&normalized) < min_words {
            return None;
        }
        Some(Pattern::from_normalized(normalized))
    }
}

/// Trims and collapses every whitespace run to a single space.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
