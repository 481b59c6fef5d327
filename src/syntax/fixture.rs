// src/syntax/fixture.rs
//! Hand-built syntax trees.
//!
//! Lets the extraction engine be driven without a parser, e.g. from tests or
//! from front ends that produce their own trees.

use super::{decode, NodeKind, Span, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureNode {
    pub kind: NodeKind,
    pub text: String,
    pub decoded: Option<String>,
    pub children: Vec<FixtureNode>,
    pub span: Span,
}

impl FixtureNode {
    fn leaf(kind: NodeKind, text: impl Into<String>, decoded: Option<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            decoded,
            children: Vec::new(),
            span: Span::default(),
        }
    }

    /// Places the node at the given 1-based line.
    #[must_use]
    pub fn at(mut self, line: usize) -> Self {
        self.span.line = line;
        self.span.column = 1;
        self
    }

    /// Sets the starting byte offset.
    #[must_use]
    pub fn from_byte(mut self, start: usize) -> Self {
        self.span.start_byte = start;
        self.span.end_byte = start + self.text.len();
        self
    }
}

/// A string literal whose decoded content is `content`.
#[must_use]
pub fn lit(content: &str) -> FixtureNode {
    FixtureNode::leaf(
        NodeKind::StringLiteral,
        format!("{content:?}"),
        Some(content.to_string()),
    )
}

#[must_use]
pub fn chr(c: char) -> FixtureNode {
    FixtureNode::leaf(NodeKind::CharLiteral, format!("{c:?}"), Some(c.to_string()))
}

#[must_use]
pub fn ident(name: &str) -> FixtureNode {
    FixtureNode::leaf(NodeKind::Identifier, name, None)
}

/// An opaque value expression such as `n + 1` or `42`.
#[must_use]
pub fn expr(text: &str) -> FixtureNode {
    FixtureNode::leaf(NodeKind::Expression, text, None)
}

/// An expression wrapping other nodes, e.g. a parenthesized sub-chain.
#[must_use]
pub fn expr_of(text: &str, children: Vec<FixtureNode>) -> FixtureNode {
    FixtureNode {
        children,
        ..FixtureNode::leaf(NodeKind::Expression, text, None)
    }
}

#[must_use]
pub fn call(callee: &str, args: Vec<FixtureNode>) -> FixtureNode {
    let rendered: Vec<&str> = args.iter().map(|a| a.text.as_str()).collect();
    let text = format!("{callee}({})", rendered.join(", "));
    let mut children = vec![ident(callee)];
    children.extend(args);
    FixtureNode {
        children,
        ..FixtureNode::leaf(NodeKind::Call, text, None)
    }
}

/// `head << a << b ...` as the left-nested tree a parser would build.
#[must_use]
pub fn chain(head: FixtureNode, operands: Vec<FixtureNode>) -> FixtureNode {
    operands.into_iter().fold(head, |left, right| {
        let text = format!("{} << {}", left.text, right.text);
        FixtureNode {
            children: vec![left, right],
            ..FixtureNode::leaf(NodeKind::Insertion, text, None)
        }
    })
}

/// Adjacent literal pieces with no operator between them.
#[must_use]
pub fn adjacent(pieces: Vec<FixtureNode>) -> FixtureNode {
    let rendered: Vec<&str> = pieces.iter().map(|p| p.text.as_str()).collect();
    let text = rendered.join(" ");
    FixtureNode {
        children: pieces,
        ..FixtureNode::leaf(NodeKind::Concatenated, text, None)
    }
}

/// A comment given with its markers, e.g. `// note` or `/* note */`.
#[must_use]
pub fn comment(raw: &str) -> FixtureNode {
    FixtureNode::leaf(NodeKind::Comment, raw, Some(decode::comment(raw)))
}

/// Any node the engine has no special handling for.
#[must_use]
pub fn other(kind: &'static str, children: Vec<FixtureNode>) -> FixtureNode {
    FixtureNode {
        children,
        ..FixtureNode::leaf(NodeKind::Other(kind), kind, None)
    }
}

impl SyntaxNode for FixtureNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }

    fn decoded_text(&self) -> Option<String> {
        self.decoded.clone()
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_nests_to_the_left() {
        let c = chain(ident("os"), vec![lit("a"), ident("x")]);
        assert_eq!(c.kind, NodeKind::Insertion);
        assert_eq!(c.children[0].kind, NodeKind::Insertion);
        assert_eq!(c.children[1].text, "x");
        assert_eq!(c.text, "os << \"a\" << x");
    }

    #[test]
    fn test_call_puts_callee_first() {
        let c = call("errmsg", vec![lit("oops"), expr("1")]);
        assert_eq!(c.children.len(), 3);
        assert_eq!(c.children[0].text, "errmsg");
    }
}
