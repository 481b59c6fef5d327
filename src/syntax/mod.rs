// src/syntax/mod.rs
//! Read-only view of a concrete syntax tree.
//!
//! The extraction engine never touches a parser's node type directly. It only
//! sees the [`SyntaxNode`] capability trait, which is implemented by the
//! tree-sitter adapter in [`tree`] and by the hand-built trees in [`fixture`].

pub mod decode;
pub mod fixture;
pub mod tree;

use std::fmt;

pub use tree::{parse_cpp, TsNode};

/// Shape tags understood by the extraction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A string literal (plain, raw, prefixed or with a user-defined suffix).
    StringLiteral,
    /// A character literal.
    CharLiteral,
    /// A plain or qualified name.
    Identifier,
    /// Any other value-producing sub-expression.
    Expression,
    /// A call. Children are the callee followed by the arguments.
    Call,
    /// A binary `<<`. Children are the left and right operands.
    Insertion,
    /// Adjacent string literals with no operator between them.
    Concatenated,
    /// A source comment.
    Comment,
    /// Anything else; carries the parser's own kind name.
    Other(&'static str),
}

impl NodeKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::StringLiteral => "string literal",
            Self::CharLiteral => "char literal",
            Self::Identifier => "identifier",
            Self::Expression => "expression",
            Self::Call => "call",
            Self::Insertion => "insertion chain",
            Self::Concatenated => "adjacent literal sequence",
            Self::Comment => "comment",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source location of a node. Lines and columns are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Capability interface over a foreign syntax tree node.
pub trait SyntaxNode: Clone {
    fn kind(&self) -> NodeKind;

    fn span(&self) -> Span;

    /// Ordered children relevant to extraction. Punctuation is never included.
    fn children(&self) -> Vec<Self>;

    /// Decoded content for literal and comment nodes, `None` otherwise.
    fn decoded_text(&self) -> Option<String>;

    /// Raw source text of the node.
    fn text(&self) -> String;
}

/// Name used to look a call or chain head up in the classification table.
///
/// Whitespace and template arguments are dropped, so `str :: stream` and
/// `make<int>` become `str::stream` and `make`.
#[must_use]
pub fn callable_name(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.find('<') {
        Some(idx) => compact[..idx].to_string(),
        None => compact,
    }
}

/// Last path segment of a name (`std::cout` → `cout`, `self->out` → `out`).
#[must_use]
pub fn last_segment(name: &str) -> &str {
    name.rsplit(|c| c == ':' || c == '.' || c == '>')
        .find(|s| !s.is_empty())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callable_name_strips_whitespace_and_templates() {
        assert_eq!(callable_name("str :: stream"), "str::stream");
        assert_eq!(callable_name("make<int, 3>"), "make");
    }

    #[test]
    fn last_segment_handles_all_separators() {
        assert_eq!(last_segment("std::cout"), "cout");
        assert_eq!(last_segment("obj.out"), "out");
        assert_eq!(last_segment("self->out"), "out");
        assert_eq!(last_segment("plain"), "plain");
    }
}
