// src/extract/scan.rs
//! Applies the extraction engine to every candidate expression of a tree.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{chain_operands, ChainRole, Extraction, ExtractionFailure, Extractor, Fragment, Pattern};
use crate::syntax::{NodeKind, SyntaxNode};

/// What to do when a subtree cannot be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Record the failure and continue with sibling subtrees.
    #[default]
    Skip,
    /// Stop at the first failure.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: FailureMode,
    pub comments: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: FailureMode::Skip,
            comments: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub emitted: usize,
    pub duplicates: usize,
    pub discarded: usize,
    pub suppressed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Unique patterns in first-seen order.
    pub patterns: Vec<Pattern>,
    pub failures: Vec<ExtractionFailure>,
    pub stats: ScanStats,
}

/// Scans a whole tree.
///
/// # Errors
/// In [`FailureMode::Strict`], returns the first extraction failure.
pub fn scan<N: SyntaxNode>(
    root: &N,
    extractor: &Extractor,
    options: ScanOptions,
) -> Result<ScanOutput, ExtractionFailure> {
    let mut scanner = Scanner {
        extractor,
        options,
        seen: HashSet::new(),
        accumulators: Vec::new(),
        accumulator_index: HashMap::new(),
        out: ScanOutput::default(),
    };
    scanner.visit(root)?;
    scanner.flush_accumulators();
    Ok(scanner.out)
}

struct Scanner<'e> {
    extractor: &'e Extractor,
    options: ScanOptions,
    seen: HashSet<Pattern>,
    accumulators: Vec<Fragment>,
    accumulator_index: HashMap<String, usize>,
    out: ScanOutput,
}

impl Scanner<'_> {
    fn visit<N: SyntaxNode>(&mut self, node: &N) -> Result<(), ExtractionFailure> {
        match node.kind() {
            NodeKind::Comment => {
                if self.options.comments && node.span().start_byte != 0 {
                    self.extract_leaf(node)?;
                }
                Ok(())
            }
            NodeKind::StringLiteral | NodeKind::CharLiteral | NodeKind::Concatenated => {
                self.extract_leaf(node)
            }
            NodeKind::Insertion => self.visit_chain(node),
            NodeKind::Call => self.visit_call(node),
            NodeKind::Identifier => Ok(()),
            NodeKind::Expression | NodeKind::Other(_) => self.visit_all(&node.children()),
        }
    }

    fn visit_all<N: SyntaxNode>(&mut self, nodes: &[N]) -> Result<(), ExtractionFailure> {
        for child in nodes {
            self.visit(child)?;
        }
        Ok(())
    }

    /// Visits only operands a builder does not consume itself.
    fn visit_nested<N: SyntaxNode>(&mut self, nodes: &[N]) -> Result<(), ExtractionFailure> {
        for child in nodes {
            if !matches!(
                child.kind(),
                NodeKind::StringLiteral
                    | NodeKind::CharLiteral
                    | NodeKind::Concatenated
                    | NodeKind::Comment
            ) {
                self.visit(child)?;
            }
        }
        Ok(())
    }

    fn extract_leaf<N: SyntaxNode>(&mut self, node: &N) -> Result<(), ExtractionFailure> {
        match self.extractor.extract(node) {
            Ok(outcome) => {
                self.record(outcome);
                Ok(())
            }
            Err(failure) => self.fail(failure),
        }
    }

    fn visit_chain<N: SyntaxNode>(&mut self, node: &N) -> Result<(), ExtractionFailure> {
        let operands = match chain_operands(node) {
            Ok(ops) => ops,
            Err(failure) => return self.fail(failure),
        };
        let role = match self.extractor.chain_role(node) {
            Ok(role) => role,
            Err(failure) => return self.fail(failure),
        };

        match role {
            ChainRole::Diagnostic => {
                self.out.stats.suppressed += 1;
                Ok(())
            }
            ChainRole::Unclassified => self.visit_all(&operands),
            ChainRole::Accumulator(name) => match self.extractor.chain_fragment(node) {
                Ok(fragment) => {
                    self.visit_nested(operands.get(1..).unwrap_or_default())?;
                    self.accumulate(name, &fragment);
                    Ok(())
                }
                Err(failure) => self.fail(failure),
            },
            ChainRole::Builder => match self.extractor.extract(node) {
                Ok(outcome) => {
                    self.visit_nested(operands.get(1..).unwrap_or_default())?;
                    self.record(outcome);
                    Ok(())
                }
                Err(failure) => self.fail(failure),
            },
        }
    }

    fn visit_call<N: SyntaxNode>(&mut self, node: &N) -> Result<(), ExtractionFailure> {
        let children = node.children();
        match self.extractor.extract(node) {
            Ok(Extraction::Unmerged) => self.visit_all(&children),
            Ok(Extraction::Suppressed) => {
                self.out.stats.suppressed += 1;
                Ok(())
            }
            Ok(outcome) => {
                self.visit_nested(children.get(1..).unwrap_or_default())?;
                self.record(outcome);
                Ok(())
            }
            Err(failure) => self.fail(failure),
        }
    }

    fn accumulate(&mut self, name: String, fragment: &Fragment) {
        let idx = *self.accumulator_index.entry(name).or_insert_with(|| {
            self.accumulators.push(Fragment::new());
            self.accumulators.len() - 1
        });
        if let Some(acc) = self.accumulators.get_mut(idx) {
            acc.append(fragment);
        }
    }

    fn flush_accumulators(&mut self) {
        let pending = std::mem::take(&mut self.accumulators);
        for fragment in &pending {
            let outcome = self.extractor.complete(fragment);
            self.record(outcome);
        }
    }

    fn record(&mut self, outcome: Extraction) {
        match outcome {
            Extraction::Pattern(pattern) => {
                if self.seen.insert(pattern.clone()) {
                    self.out.patterns.push(pattern);
                    self.out.stats.emitted += 1;
                } else {
                    self.out.stats.duplicates += 1;
                }
            }
            Extraction::Empty => self.out.stats.discarded += 1,
            Extraction::Suppressed => self.out.stats.suppressed += 1,
            Extraction::Unmerged => {}
        }
    }

    fn fail(&mut self, failure: ExtractionFailure) -> Result<(), ExtractionFailure> {
        self.out.stats.failed += 1;
        match self.options.mode {
            FailureMode::Strict => Err(failure),
            FailureMode::Skip => {
                debug!(%failure, "skipping subtree");
                self.out.failures.push(failure);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::fixture::{call, chain, comment, expr_of, ident, lit, other};

    fn texts(out: &ScanOutput) -> Vec<&str> {
        out.patterns.iter().map(Pattern::as_str).collect()
    }

    #[test]
    fn test_builder_literals_are_not_emitted_twice() {
        let root = other(
            "translation_unit",
            vec![call(
                "errmsg",
                vec![lit("first part of"), lit("the same message")],
            )],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["first part of the same message"]);
    }

    #[test]
    fn test_unmerged_call_literals_stand_alone() {
        let root = call(
            "compute",
            vec![lit("alpha beta gamma"), lit("delta epsilon zeta")],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["alpha beta gamma", "delta epsilon zeta"]);
    }

    #[test]
    fn test_nested_builder_is_innermost_first() {
        let inner = chain(
            call("str::stream", vec![]),
            vec![lit("inner value is "), ident("v")],
        );
        let outer = call(
            "errmsg",
            vec![lit("outer wrapper for"), expr_of("(inner)", vec![inner])],
        );
        let out = scan(&outer, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(
            texts(&out),
            vec!["inner value is %s", "outer wrapper for %s"]
        );
    }

    #[test]
    fn test_accumulators_flush_in_first_seen_order() {
        let root = other(
            "compound_statement",
            vec![
                chain(ident("b"), vec![lit("second buffer ")]),
                chain(ident("a"), vec![lit("first "), ident("x")]),
                chain(ident("b"), vec![lit("grows here")]),
                chain(ident("a"), vec![lit(" buffer done")]),
            ],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(
            texts(&out),
            vec!["second buffer grows here", "first %s buffer done"]
        );
    }

    #[test]
    fn test_header_comment_skipped_other_comments_kept() {
        let root = other(
            "translation_unit",
            vec![
                comment("// Copyright header with many words").from_byte(0),
                comment("/* explains the retry loop */").from_byte(40),
            ],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["explains the retry loop"]);

        let quiet = ScanOptions {
            comments: false,
            ..ScanOptions::default()
        };
        let out = scan(&root, &Extractor::default(), quiet).unwrap();
        assert!(out.patterns.is_empty());
    }

    #[test]
    fn test_skip_records_failure_and_continues() {
        let root = other(
            "translation_unit",
            vec![
                chain(call("str::stream", vec![]), vec![other("lambda", vec![]).at(3)]),
                lit("still extracted afterwards"),
            ],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["still extracted afterwards"]);
        assert_eq!(out.failures.len(), 1);
        assert_eq!(out.failures[0].span.line, 3);

        let strict = ScanOptions {
            mode: FailureMode::Strict,
            ..ScanOptions::default()
        };
        assert!(scan(&root, &Extractor::default(), strict).is_err());
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let root = other(
            "translation_unit",
            vec![lit("same text here"), lit("other text here"), lit("same  text here")],
        );
        let out = scan(&root, &Extractor::default(), ScanOptions::default()).unwrap();
        assert_eq!(texts(&out), vec!["same text here", "other text here"]);
        assert_eq!(out.stats.duplicates, 1);
    }
}
