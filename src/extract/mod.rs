// src/extract/mod.rs
//! Pattern extraction engine.
//!
//! Turns one expression tree (an insertion chain, a call, an adjacent-literal
//! sequence or a lone literal) into at most one normalized message pattern.
//! Every non-literal operand that contributes becomes exactly one placeholder
//! in the position it occupied; shapes the engine does not understand are
//! reported as [`ExtractionFailure`]s instead of being guessed at.
//!
//! [`scan`] applies the engine to every candidate expression of a file.

pub mod classify;
pub mod fragment;
pub mod scan;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::syntax::{callable_name, last_segment, NodeKind, Span, SyntaxNode};

pub use classify::{Classifier, Role};
pub use fragment::Fragment;
pub use scan::{scan, FailureMode, ScanOptions, ScanOutput, ScanStats};

/// Placeholder used for non-literal operands unless configured otherwise.
pub const DEFAULT_PLACEHOLDER: &str = "%s";
pub const DEFAULT_MIN_WORDS: usize = 3;

/// Stream manipulators that end a line and contribute nothing to a message.
pub const DEFAULT_TERMINATORS: &[&str] = &[
    "endl",
    "std::endl",
    "ends",
    "std::ends",
    "flush",
    "std::flush",
];

/// One normalized message: trimmed, whitespace runs collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Pattern(String);

impl Pattern {
    /// Builds a pattern from arbitrary text, normalizing whitespace.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(fragment::normalize(text))
    }

    pub(crate) fn from_normalized(text: String) -> Self {
        Self(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Successful outcome of extracting one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Pattern(Pattern),
    /// No literal content, or fewer words than the configured minimum.
    Empty,
    /// Diagnostic output; neither the expression nor its literals are patterns.
    Suppressed,
    /// Unclassified expression. Its literal parts stand on their own.
    Unmerged,
}

impl Extraction {
    #[must_use]
    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            Self::Pattern(p) => Some(p),
            _ => None,
        }
    }
}

/// A node shape the engine cannot turn into a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{span}: cannot extract from {kind}: {description}")]
pub struct ExtractionFailure {
    pub span: Span,
    pub kind: NodeKind,
    pub description: String,
}

impl ExtractionFailure {
    fn at<N: SyntaxNode>(node: &N, description: impl Into<String>) -> Self {
        Self {
            span: node.span(),
            kind: node.kind(),
            description: description.into(),
        }
    }
}

/// How an insertion chain is treated, decided by its head operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainRole {
    Builder,
    /// Repeated `<<` into a plain variable; contributions collect per name.
    Accumulator(String),
    Diagnostic,
    Unclassified,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    classifier: Classifier,
    placeholder: String,
    terminators: Vec<String>,
    min_words: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl Extractor {
    #[must_use]
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            terminators: DEFAULT_TERMINATORS.iter().map(ToString::to_string).collect(),
            min_words: DEFAULT_MIN_WORDS,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, marker: impl Into<String>) -> Self {
        self.placeholder = marker.into();
        self
    }

    #[must_use]
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    #[must_use]
    pub fn with_terminators(mut self, terminators: Vec<String>) -> Self {
        self.terminators = terminators;
        self
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Extracts the pattern rooted at `node`.
    ///
    /// # Errors
    /// Returns an [`ExtractionFailure`] for node shapes the engine does not
    /// understand, anywhere inside the contributing operands.
    pub fn extract<N: SyntaxNode>(&self, node: &N) -> Result<Extraction, ExtractionFailure> {
        match node.kind() {
            NodeKind::StringLiteral | NodeKind::CharLiteral | NodeKind::Comment => {
                let text = node
                    .decoded_text()
                    .ok_or_else(|| ExtractionFailure::at(node, "literal has no decodable text"))?;
                let mut fragment = Fragment::new();
                fragment.push_literal(&text);
                Ok(self.complete(&fragment))
            }
            NodeKind::Concatenated => {
                let fragment = self.concatenation(node)?;
                Ok(self.complete(&fragment))
            }
            NodeKind::Insertion => match self.chain_role(node)? {
                ChainRole::Diagnostic => Ok(Extraction::Suppressed),
                ChainRole::Unclassified => Ok(Extraction::Unmerged),
                ChainRole::Builder | ChainRole::Accumulator(_) => {
                    let fragment = self.chain_fragment(node)?;
                    Ok(self.complete(&fragment))
                }
            },
            NodeKind::Call => match self.call_role(node) {
                Some(Role::DiagnosticOutput) => Ok(Extraction::Suppressed),
                Some(Role::MessageBuilder) => {
                    let fragment = self.call_fragment(node)?;
                    Ok(self.complete(&fragment))
                }
                None => Ok(Extraction::Unmerged),
            },
            kind => Err(ExtractionFailure::at(
                node,
                format!("a bare {kind} is not a message expression"),
            )),
        }
    }

    /// Role of a call, looked up by its callee name.
    #[must_use]
    pub fn call_role<N: SyntaxNode>(&self, node: &N) -> Option<Role> {
        let callee = node.children().into_iter().next()?;
        self.classifier.lookup(&callable_name(&callee.text()))
    }

    /// Role of an insertion chain, decided by its head operand.
    ///
    /// # Errors
    /// Returns a failure if the chain is malformed.
    pub fn chain_role<N: SyntaxNode>(&self, node: &N) -> Result<ChainRole, ExtractionFailure> {
        let operands = chain_operands(node)?;
        let Some(head) = operands.first() else {
            return Ok(ChainRole::Unclassified);
        };

        let role = match head.kind() {
            NodeKind::Call => match self.call_role(head) {
                Some(Role::MessageBuilder) => ChainRole::Builder,
                Some(Role::DiagnosticOutput) => ChainRole::Diagnostic,
                None => ChainRole::Unclassified,
            },
            // Builder entries name calls; a variable that shares the name
            // still accumulates. Only stream objects override.
            NodeKind::Identifier => {
                let name = callable_name(&head.text());
                match self.classifier.lookup(&name) {
                    Some(Role::DiagnosticOutput) => ChainRole::Diagnostic,
                    _ if is_plain_identifier(&name) => ChainRole::Accumulator(name),
                    Some(Role::MessageBuilder) => ChainRole::Builder,
                    None => ChainRole::Unclassified,
                }
            }
            _ => ChainRole::Unclassified,
        };
        Ok(role)
    }

    /// Raw contribution of every operand after the chain head.
    ///
    /// # Errors
    /// Returns a failure for an operand shape the engine does not understand.
    pub fn chain_fragment<N: SyntaxNode>(&self, node: &N) -> Result<Fragment, ExtractionFailure> {
        let mut fragment = Fragment::new();
        for operand in chain_operands(node)?.iter().skip(1) {
            self.contribute(operand, &mut fragment)?;
        }
        Ok(fragment)
    }

    /// Finishes a fragment into an extraction outcome.
    #[must_use]
    pub fn complete(&self, fragment: &Fragment) -> Extraction {
        match fragment.finish(self.min_words) {
            Some(pattern) => Extraction::Pattern(pattern),
            None => Extraction::Empty,
        }
    }

    fn call_fragment<N: SyntaxNode>(&self, node: &N) -> Result<Fragment, ExtractionFailure> {
        let mut fragment = Fragment::new();
        for arg in node.children().iter().skip(1) {
            let mut piece = Fragment::new();
            self.contribute(arg, &mut piece)?;
            if !piece.raw().is_empty() {
                fragment.push_separator();
                fragment.append(&piece);
            }
        }
        Ok(fragment)
    }

    fn concatenation<N: SyntaxNode>(&self, node: &N) -> Result<Fragment, ExtractionFailure> {
        let mut fragment = Fragment::new();
        for piece in node.children() {
            match piece.kind() {
                NodeKind::StringLiteral | NodeKind::CharLiteral => {
                    fragment.push_literal(&piece.decoded_text().unwrap_or_default());
                }
                NodeKind::Identifier => fragment.push_placeholder(&self.placeholder),
                NodeKind::Comment => {}
                kind => {
                    return Err(ExtractionFailure::at(
                        &piece,
                        format!("unexpected {kind} between adjacent literals"),
                    ))
                }
            }
        }
        Ok(fragment)
    }

    fn contribute<N: SyntaxNode>(
        &self,
        operand: &N,
        fragment: &mut Fragment,
    ) -> Result<(), ExtractionFailure> {
        match operand.kind() {
            NodeKind::StringLiteral | NodeKind::CharLiteral => {
                fragment.push_literal(&operand.decoded_text().unwrap_or_default());
            }
            NodeKind::Concatenated => fragment.append(&self.concatenation(operand)?),
            NodeKind::Identifier if self.is_terminator(&operand.text()) => {}
            NodeKind::Identifier
            | NodeKind::Expression
            | NodeKind::Call
            | NodeKind::Insertion => fragment.push_placeholder(&self.placeholder),
            NodeKind::Comment => {}
            NodeKind::Other(kind) => {
                return Err(ExtractionFailure::at(
                    operand,
                    format!("unsupported operand `{kind}`"),
                ))
            }
        }
        Ok(())
    }

    fn is_terminator(&self, text: &str) -> bool {
        let name = callable_name(text);
        self.terminators
            .iter()
            .any(|t| *t == name || (!t.contains(':') && t == last_segment(&name)))
    }
}

/// Flattens a left-nested insertion chain into `[head, op1, op2, ...]`.
///
/// # Errors
/// Returns a failure if an insertion node does not have exactly two operands.
pub fn chain_operands<N: SyntaxNode>(node: &N) -> Result<Vec<N>, ExtractionFailure> {
    let mut reversed = Vec::new();
    let mut current = node.clone();
    while current.kind() == NodeKind::Insertion {
        let mut kids = current.children();
        if kids.len() != 2 {
            return Err(ExtractionFailure::at(
                &current,
                format!("insertion with {} operands", kids.len()),
            ));
        }
        let (Some(right), Some(left)) = (kids.pop(), kids.pop()) else {
            break;
        };
        reversed.push(right);
        current = left;
    }
    reversed.push(current);
    reversed.reverse();
    Ok(reversed)
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::fixture::{adjacent, call, chain, chr, expr, ident, lit, other};

    fn pattern_of(e: Extraction) -> String {
        e.pattern().map(ToString::to_string).unwrap_or_default()
    }

    #[test]
    fn test_builder_chain_collapses_operands() {
        let node = chain(
            call("str::stream", vec![]),
            vec![lit("Invalid field "), ident("name"), lit(" in "), expr("n + 1")],
        );
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "Invalid field %s in %s");
    }

    #[test]
    fn test_adjacent_placeholders_are_not_merged() {
        let node = chain(
            call("str::stream", vec![]),
            vec![lit("pair "), ident("a"), ident("b"), lit(" done")],
        );
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "pair %s%s done");
    }

    #[test]
    fn test_terminators_contribute_nothing() {
        let node = chain(
            ident("msg"),
            vec![lit("closing the stream"), ident("std::endl")],
        );
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "closing the stream");
    }

    #[test]
    fn test_builder_call_joins_arguments() {
        let node = call(
            "errmsg",
            vec![lit("could not open file"), ident("path"), lit("for reading")],
        );
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "could not open file %s for reading");
    }

    #[test]
    fn test_builder_call_without_literals_is_empty() {
        let node = call("errmsg", vec![ident("a"), expr("b + c")]);
        assert_eq!(Extractor::default().extract(&node).unwrap(), Extraction::Empty);
    }

    #[test]
    fn test_diagnostics_are_suppressed() {
        let chain_out = chain(ident("std::cerr"), vec![lit("fatal error in module")]);
        let call_out = call("printf", vec![lit("value is %d here")]);
        let ex = Extractor::default();
        assert_eq!(ex.extract(&chain_out).unwrap(), Extraction::Suppressed);
        assert_eq!(ex.extract(&call_out).unwrap(), Extraction::Suppressed);
    }

    #[test]
    fn test_unknown_calls_are_unmerged() {
        let node = call("compute", vec![lit("some literal text")]);
        assert_eq!(Extractor::default().extract(&node).unwrap(), Extraction::Unmerged);
    }

    #[test]
    fn test_adjacent_literals_join_with_macro_placeholder() {
        let node = adjacent(vec![lit("read "), ident("PRId64"), lit(" bytes from disk")]);
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "read %s bytes from disk");
    }

    #[test]
    fn test_unsupported_operand_fails_with_span() {
        let bad = other("lambda_body", vec![]).at(7);
        let node = chain(call("str::stream", vec![]), vec![lit("text "), bad]);
        let err = Extractor::default().extract(&node).unwrap_err();
        assert_eq!(err.span.line, 7);
        assert_eq!(err.kind, NodeKind::Other("lambda_body"));
    }

    #[test]
    fn test_bare_identifier_is_a_failure_not_empty() {
        let err = Extractor::default().extract(&ident("x")).unwrap_err();
        assert_eq!(err.kind, NodeKind::Identifier);
    }

    #[test]
    fn test_char_literals_count_as_literals() {
        let node = chain(
            call("str::stream", vec![]),
            vec![lit("key"), chr('='), ident("v"), lit(" is unset")],
        );
        let out = Extractor::default().extract(&node).unwrap();
        assert_eq!(pattern_of(out), "key=%s is unset");
    }

    #[test]
    fn test_chain_roles() {
        let ex = Extractor::default();
        let acc = chain(ident("buf"), vec![lit("x")]);
        assert_eq!(ex.chain_role(&acc).unwrap(), ChainRole::Accumulator("buf".into()));
        let qualified = chain(ident("ns::buf"), vec![lit("x")]);
        assert_eq!(ex.chain_role(&qualified).unwrap(), ChainRole::Unclassified);
        let head_call = chain(call("LOG", vec![ident("ERROR")]), vec![lit("x")]);
        assert_eq!(ex.chain_role(&head_call).unwrap(), ChainRole::Unclassified);
    }

    #[test]
    fn test_variable_named_like_builder_accumulates() {
        let ex = Extractor::default();
        let var = chain(ident("errmsg"), vec![lit("View cycle detected: ")]);
        assert_eq!(ex.chain_role(&var).unwrap(), ChainRole::Accumulator("errmsg".into()));
        let stream = chain(ident("cerr"), vec![lit("x")]);
        assert_eq!(ex.chain_role(&stream).unwrap(), ChainRole::Diagnostic);
    }

    #[test]
    fn test_custom_placeholder_and_min_words() {
        let ex = Extractor::default().with_placeholder("{}").with_min_words(5);
        let node = call("errhint", vec![lit("retry"), ident("n"), lit("times")]);
        assert_eq!(ex.extract(&node).unwrap(), Extraction::Empty);
        let ex = ex.with_min_words(2);
        assert_eq!(pattern_of(ex.extract(&node).unwrap()), "retry {} times");
    }
}
