// src/baseline/store.rs
//! Baseline persistence: a JSON array of unique strings.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::Pattern;

/// An order-insensitive set of patterns, always written sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    patterns: BTreeSet<String>,
}

impl Baseline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        self.patterns.insert(pattern.into())
    }

    pub fn extend_patterns<I>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = Pattern>,
    {
        self.patterns
            .extend(patterns.into_iter().map(Pattern::into_string));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Patterns in their persisted (sorted) order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.patterns.iter().cloned().collect()
    }

    /// Parses baseline JSON. `origin` names the input in error messages.
    ///
    /// # Errors
    /// Returns [`Error::MalformedInput`] unless `text` is a JSON array of strings.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        Ok(parse_lines(text, origin)?.into_iter().collect())
    }

    /// Loads a baseline file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::parse(&text, path)
    }

    /// Pretty-printed JSON, sorted, with a trailing newline.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.patterns)?;
        out.push('\n');
        Ok(out)
    }

    /// Writes the baseline without ever leaving a partial file behind.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        atomic_write(path, &json)
    }
}

impl FromIterator<String> for Baseline {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

/// Parses a JSON array of strings, keeping file order and duplicates.
///
/// # Errors
/// Returns [`Error::MalformedInput`] unless `text` is a JSON array of strings.
pub fn parse_lines(text: &str, origin: &Path) -> Result<Vec<String>> {
    serde_json::from_str(text)
        .map_err(|e| Error::malformed(origin, format!("expected a JSON array of strings ({e})")))
}

/// Loads a pattern list for comparison. Indices into the result are
/// positions in the file.
///
/// # Errors
/// Returns error if the file cannot be read or is malformed.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
    parse_lines(&text, path)
}

/// Writes `content` to a sibling temporary file, then renames it over `path`.
///
/// # Errors
/// Returns error if either step fails. The temporary file is removed on a
/// failed rename.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content).map_err(|e| Error::io(e, &temp_path))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(e, path));
    }
    Ok(())
}
