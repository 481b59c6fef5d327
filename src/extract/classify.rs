// src/extract/classify.rs
//! Call-site classification table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::syntax::last_segment;

/// What a named call or insertion-chain head does with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Operands form one message.
    MessageBuilder,
    /// Prints or logs. Never produces a pattern.
    DiagnosticOutput,
}

impl Role {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MessageBuilder => "message-builder",
            Self::DiagnosticOutput => "diagnostic-output",
        }
    }
}

const DEFAULT_BUILDERS: &[&str] = &[
    "str::stream",
    "std::stream",
    "errmsg",
    "errmsg_internal",
    "errdetail",
    "errdetail_log",
    "errhint",
];

const DEFAULT_DIAGNOSTICS: &[&str] = &["cout", "cerr", "clog", "printf", "fprintf", "puts"];

/// Name → role lookup. Unknown names are unclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    table: HashMap<String, Role>,
}

impl Default for Classifier {
    fn default() -> Self {
        let table = default_table()
            .into_iter()
            .map(|(name, role)| (name.to_string(), role))
            .collect();
        Self { table }
    }
}

/// The built-in classification entries.
#[must_use]
pub fn default_table() -> Vec<(&'static str, Role)> {
    DEFAULT_BUILDERS
        .iter()
        .map(|n| (*n, Role::MessageBuilder))
        .chain(DEFAULT_DIAGNOSTICS.iter().map(|n| (*n, Role::DiagnosticOutput)))
        .collect()
}

impl Classifier {
    #[must_use]
    pub fn new(table: HashMap<String, Role>) -> Self {
        Self { table }
    }

    pub fn insert(&mut self, name: impl Into<String>, role: Role) {
        self.table.insert(name.into(), role);
    }

    /// Looks the full name up first, then its last path segment, so `cout`
    /// covers `std::cout` while `str::stream` only matches itself.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Role> {
        self.table
            .get(name)
            .or_else(|| self.table.get(last_segment(name)))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
