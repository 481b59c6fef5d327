// src/syntax/tree.rs
//! Tree-sitter (C++ grammar) adapter for the [`SyntaxNode`] interface.

use tree_sitter::{Node, Parser, Tree};

use super::{decode, NodeKind, Span, SyntaxNode};
use crate::error::{Error, Result};
use crate::lang::Lang;

/// Grammar kinds that produce a value and are opaque to extraction.
const VALUE_KINDS: &[&str] = &[
    "number_literal",
    "true",
    "false",
    "null",
    "nullptr",
    "this",
    "field_expression",
    "subscript_expression",
    "unary_expression",
    "pointer_expression",
    "update_expression",
    "parenthesized_expression",
    "cast_expression",
    "conditional_expression",
    "sizeof_expression",
    "alignof_expression",
    "new_expression",
    "template_function",
    "lambda_expression",
    "compound_literal_expression",
    "initializer_list",
    "assignment_expression",
];

const NAME_KINDS: &[&str] = &[
    "identifier",
    "qualified_identifier",
    "field_identifier",
    "namespace_identifier",
];

/// Parses C/C++ source with the tree-sitter C++ grammar.
///
/// # Errors
/// Returns error if the grammar cannot be loaded or the parser yields no tree.
pub fn parse_cpp(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&Lang::Cpp.grammar())
        .map_err(|e| Error::Other(format!("C++ grammar rejected: {e}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| Error::Other("tree-sitter produced no tree".to_string()))
}

/// A tree-sitter node paired with the source bytes it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct TsNode<'a> {
    node: Node<'a>,
    source: &'a [u8],
}

impl<'a> TsNode<'a> {
    #[must_use]
    pub fn new(node: Node<'a>, source: &'a [u8]) -> Self {
        Self { node, source }
    }

    #[must_use]
    pub fn root(tree: &'a Tree, source: &'a [u8]) -> Self {
        Self::new(tree.root_node(), source)
    }

    fn wrap(&self, node: Node<'a>) -> Self {
        Self::new(node, self.source)
    }

    fn field(&self, name: &str) -> Option<Self> {
        self.node.child_by_field_name(name).map(|n| self.wrap(n))
    }

    fn named_children(&self, keep_comments: bool) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|n| keep_comments || n.kind() != "comment")
            .map(|n| self.wrap(n))
            .collect()
    }

    fn is_shift(&self) -> bool {
        self.node
            .child_by_field_name("operator")
            .is_some_and(|op| op.kind() == "<<")
    }

    fn udl_body_kind(&self) -> Option<&'static str> {
        self.node.named_child(0).map(|n| n.kind())
    }

    fn is_string_udl(&self) -> bool {
        matches!(
            self.udl_body_kind(),
            Some("string_literal" | "raw_string_literal")
        )
    }

    /// `"a" "b"_sd`: the suffix applies to the whole sequence.
    fn is_concatenated_udl(&self) -> bool {
        self.udl_body_kind() == Some("concatenated_string")
    }

    fn in_concatenation(&self) -> bool {
        self.node
            .parent()
            .is_some_and(|p| p.kind() == "concatenated_string")
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> NodeKind {
        match self.node.kind() {
            "string_literal" | "raw_string_literal" => NodeKind::StringLiteral,
            "user_defined_literal" if self.is_string_udl() => NodeKind::StringLiteral,
            "user_defined_literal" if self.is_concatenated_udl() => NodeKind::Concatenated,
            "char_literal" => NodeKind::CharLiteral,
            "concatenated_string" => NodeKind::Concatenated,
            "comment" => NodeKind::Comment,
            "call_expression" => NodeKind::Call,
            "binary_expression" if self.is_shift() => NodeKind::Insertion,
            "binary_expression" | "user_defined_literal" => NodeKind::Expression,
            // Unexpanded macros between literals (`"a" PRId64 "b"`) often parse as ERROR.
            "ERROR" if self.in_concatenation() => NodeKind::Identifier,
            kind if NAME_KINDS.contains(&kind) => NodeKind::Identifier,
            kind if VALUE_KINDS.contains(&kind) => NodeKind::Expression,
            kind => NodeKind::Other(kind),
        }
    }

    fn span(&self) -> Span {
        let start = self.node.start_position();
        Span {
            start_byte: self.node.start_byte(),
            end_byte: self.node.end_byte(),
            line: start.row + 1,
            column: start.column + 1,
        }
    }

    fn children(&self) -> Vec<Self> {
        match self.kind() {
            NodeKind::Call => {
                let mut out: Vec<Self> = self.field("function").into_iter().collect();
                if let Some(args) = self.field("arguments") {
                    out.extend(args.named_children(false));
                }
                out
            }
            NodeKind::Concatenated if self.node.kind() == "user_defined_literal" => self
                .node
                .named_child(0)
                .map(|body| self.wrap(body).named_children(true))
                .unwrap_or_default(),
            NodeKind::Insertion => [self.field("left"), self.field("right")]
                .into_iter()
                .flatten()
                .collect(),
            NodeKind::StringLiteral
            | NodeKind::CharLiteral
            | NodeKind::Identifier
            | NodeKind::Comment => Vec::new(),
            _ => self.named_children(true),
        }
    }

    fn decoded_text(&self) -> Option<String> {
        match self.kind() {
            NodeKind::StringLiteral => Some(decode::string_literal(&self.text())),
            NodeKind::CharLiteral => Some(decode::char_literal(&self.text())),
            NodeKind::Comment => Some(decode::comment(&self.text())),
            _ => None,
        }
    }

    fn text(&self) -> String {
        self.node
            .utf8_text(self.source)
            .map(str::to_string)
            .unwrap_or_default()
    }
}
