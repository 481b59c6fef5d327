// src/config/mod.rs
pub mod types;

pub use self::types::{Config, ExtractConfig, MatchConfig};

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::extract::{classify, Classifier, Extractor, FailureMode, ScanOptions};
use crate::similarity::MatchOptions;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "msgscan.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses TOML text. Unknown role names are configuration errors.
    ///
    /// # Errors
    /// Returns [`Error::Config`] on invalid TOML or field values.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads `path`, or `msgscan.toml` from the working directory if present,
    /// or defaults. The result is not yet validated.
    ///
    /// # Errors
    /// Returns error if an explicit file is missing or any file is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let local = Path::new(CONFIG_FILE);
        let chosen = match path {
            Some(p) => p,
            None if local.is_file() => local,
            None => return Ok(Self::default()),
        };
        debug!(path = %chosen.display(), "loading config");
        let text = fs::read_to_string(chosen).map_err(|e| Error::io(e, chosen))?;
        Self::parse(&text)
    }

    /// Validates every setting before any work starts.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        if !m.min_score.is_finite() || !(0.0..=100.0).contains(&m.min_score) {
            return Err(Error::Config(format!(
                "min_score must be within [0, 100], got {}",
                m.min_score
            )));
        }
        if !m.boost.is_finite() || m.boost < 0.0 {
            return Err(Error::Config(format!(
                "boost must be a non-negative number, got {}",
                m.boost
            )));
        }
        if !m.cap.is_finite() || m.cap <= 0.0 || m.cap > 100.0 {
            return Err(Error::Config(format!(
                "cap must be within (0, 100], got {}",
                m.cap
            )));
        }
        if m.max_matches == 0 {
            return Err(Error::Config("max_matches must be at least 1".to_string()));
        }
        if self.extract.placeholder.is_empty() {
            return Err(Error::Config("placeholder must not be empty".to_string()));
        }
        if self.classifier().is_empty() {
            return Err(Error::Config(
                "classification table is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The built-in table extended (or replaced) by `[extract.calls]`.
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        let mut classifier = if self.extract.replace_default_calls {
            Classifier::new(std::collections::HashMap::new())
        } else {
            Classifier::default()
        };
        for (name, role) in &self.extract.calls {
            classifier.insert(name.clone(), *role);
        }
        classifier
    }

    #[must_use]
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.classifier())
            .with_placeholder(self.extract.placeholder.clone())
            .with_min_words(self.extract.min_words)
            .with_terminators(self.extract.terminators.clone())
    }

    #[must_use]
    pub fn scan_options(&self, strict: bool) -> ScanOptions {
        ScanOptions {
            mode: if strict {
                FailureMode::Strict
            } else {
                FailureMode::Skip
            },
            comments: self.extract.comments,
        }
    }

    #[must_use]
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            min_score: self.matching.min_score,
            max_matches: self.matching.max_matches,
            boost: self.matching.boost,
            cap: self.matching.cap,
            placeholder: self.extract.placeholder.clone(),
        }
    }

    /// Renders the effective configuration, built-in call table included.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        let mut effective = self.clone();
        if !effective.extract.replace_default_calls {
            for (name, role) in classify::default_table() {
                effective
                    .extract
                    .calls
                    .entry(name.to_string())
                    .or_insert(role);
            }
        }
        toml::to_string_pretty(&effective).map_err(|e| Error::Config(e.to_string()))
    }
}
