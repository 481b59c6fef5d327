use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::extract::{Role, DEFAULT_MIN_WORDS, DEFAULT_PLACEHOLDER, DEFAULT_TERMINATORS};
use crate::similarity::types::{DEFAULT_BOOST, DEFAULT_CAP, DEFAULT_MAX_MATCHES, DEFAULT_MIN_SCORE};

/// Contents of `msgscan.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default, rename = "match")]
    pub matching: MatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_terminators")]
    pub terminators: Vec<String>,
    #[serde(default = "default_true")]
    pub comments: bool,
    /// Extra exclusion patterns for directory scans.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_true")]
    pub default_excludes: bool,
    /// Drop the built-in classification entries instead of extending them.
    #[serde(default)]
    pub replace_default_calls: bool,
    #[serde(default)]
    pub calls: BTreeMap<String, Role>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            placeholder: default_placeholder(),
            terminators: default_terminators(),
            comments: true,
            exclude: Vec::new(),
            default_excludes: true,
            replace_default_calls: false,
            calls: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    #[serde(default = "default_boost")]
    pub boost: f64,
    #[serde(default = "default_cap")]
    pub cap: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_matches: default_max_matches(),
            boost: default_boost(),
            cap: default_cap(),
        }
    }
}

const fn default_true() -> bool { true }
const fn default_min_words() -> usize { DEFAULT_MIN_WORDS }
const fn default_max_matches() -> usize { DEFAULT_MAX_MATCHES }
const fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
const fn default_boost() -> f64 { DEFAULT_BOOST }
const fn default_cap() -> f64 { DEFAULT_CAP }

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_terminators() -> Vec<String> {
    DEFAULT_TERMINATORS.iter().map(ToString::to_string).collect()
}
