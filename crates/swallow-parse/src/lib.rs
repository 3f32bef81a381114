//! Recursive-descent parser producing a lossless syntax tree and the
//! diagnostics derived from it.
//!
//! Every entry point returns a [`Parse`]: the tree always covers the whole
//! input, and malformed input only ever shows up as diagnostics.

use std::fmt::Write as _;

use swallow_errors::Diagnostics;
use swallow_syntax::SyntaxKind::*;
use swallow_syntax::{GreenNode, NodeOrToken, SyntaxNode, SyntaxSet};
use text_size::TextSize;

use crate::parser::Parser;

mod diagnostics;
mod grammar;
mod parser;
mod recovery;
#[cfg(test)]
mod tests;

pub use grammar::ExprFlags;

/// A parsed tree together with its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Innermost node whose text, trivia excluded, starts at `offset`.
    pub fn node_at_offset(&self, offset: TextSize) -> Option<SyntaxNode> {
        self.syntax().node_starting_at(offset)
    }

    /// First node in source order that starts at or after `offset` and
    /// satisfies `predicate`.
    pub fn first_node_after(
        &self,
        offset: TextSize,
        predicate: impl Fn(&SyntaxNode) -> bool,
    ) -> Option<SyntaxNode> {
        self.syntax()
            .descendants()
            .find(|node| node.trimmed_range().start() >= offset && predicate(node))
    }

    /// Indented dump of the tree, one node or token per line. Missing
    /// tokens are marked as such.
    pub fn debug_tree(&self) -> String {
        let mut buf = String::new();
        write_node(&mut buf, &self.syntax(), 0);
        buf
    }
}

fn write_node(buf: &mut String, node: &SyntaxNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(buf, "{indent}{:?}@{:?}", node.kind(), node.text_range());

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => write_node(buf, &child, depth + 1),
            NodeOrToken::Token(token) if token.is_present() => {
                let _ = writeln!(
                    buf,
                    "{indent}  {:?}@{:?} {:?}",
                    token.kind(),
                    token.trimmed_range(),
                    token.text_trimmed()
                );
            }
            NodeOrToken::Token(token) => {
                let _ = writeln!(
                    buf,
                    "{indent}  {:?}@{:?} missing",
                    token.kind(),
                    token.text_range()
                );
            }
        }
    }
}

/// Parses a whole file.
pub fn parse_source_file(text: &str) -> Parse {
    tracing::trace!(len = text.len(), "parsing source file");
    let mut p = Parser::new(text);
    let m = p.start();
    grammar::stmts::item_list(&mut p, grammar::stmts::Body::FILE);
    p.finish_eof();
    m.complete(&mut p, SOURCE_FILE);
    finish(p)
}

/// Parses one expression. Anything after it is kept as unexpected text.
pub fn parse_expression(text: &str) -> Parse {
    parse_sequence_expression(text, ExprFlags::empty())
}

/// Parses one expression in the given mode, e.g. as the condition of a
/// `#if` clause with [`ExprFlags::DIRECTIVE`].
pub fn parse_sequence_expression(text: &str, flags: ExprFlags) -> Parse {
    tracing::trace!(len = text.len(), ?flags, "parsing expression");
    fragment(text, |p| {
        grammar::exprs::expr(p, flags);
    })
}

pub fn parse_statement(text: &str) -> Parse {
    tracing::trace!(len = text.len(), "parsing statement");
    fragment(text, |p| {
        grammar::stmts::statement(p);
    })
}

pub fn parse_closure_expression(text: &str) -> Parse {
    tracing::trace!(len = text.len(), "parsing closure");
    fragment(text, |p| {
        grammar::closures::closure(p);
    })
}

pub fn parse_return_statement(text: &str) -> Parse {
    tracing::trace!(len = text.len(), "parsing return statement");
    fragment(text, |p| {
        grammar::stmts::return_stmt(p);
    })
}

fn fragment(text: &str, rule: impl FnOnce(&mut Parser<'_>)) -> Parse {
    let mut p = Parser::new(text);
    let m = p.start();
    rule(&mut p);
    recovery::skip_until(&mut p, &SyntaxSet::EMPTY);
    p.finish_eof();
    m.complete(&mut p, SOURCE_FRAGMENT);
    finish(p)
}

fn finish(p: Parser<'_>) -> Parse {
    let (green, overrides) = p.build_tree();
    let diagnostics = diagnostics::generate(&SyntaxNode::new_root(green.clone()), &overrides);
    Parse { green, diagnostics }
}
