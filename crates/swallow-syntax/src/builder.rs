//! Incremental builder for the immutable syntax tree.

use text_size::{TextRange, TextSize};

use crate::{Green, GreenNode, GreenToken, GreenTrivia, NodeOrToken, SyntaxKind};

/// Builds a `GreenNode` from a stream of start/token/finish calls.
pub struct Builder<'text> {
    text: &'text str,
    text_pos: TextSize,
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<Green>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;

impl<'text> Builder<'text> {
    /// Creates a new builder over `text`. Tokens are taken from `text` in
    /// order, so every present token must be pushed exactly once.
    pub fn new(text: &'text str) -> Self {
        Self {
            text,
            text_pos: TextSize::new(0),
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let Some((kind, first_child)) = self.parents.pop() else {
            panic!("`finish_node` called without an open node");
        };
        let children = self.children.split_off(first_child);
        self.children.push(NodeOrToken::Node(GreenNode::new(kind, children)));
    }

    /// Adds a token read from the source. `kind_range` covers the token
    /// itself; the trivia lengths extend it on both sides.
    pub fn token(
        &mut self,
        leading: GreenTrivia,
        kind: SyntaxKind,
        kind_range: TextRange,
        trailing: GreenTrivia,
    ) {
        let start = self.text_pos;
        debug_assert_eq!(start + leading.len(), kind_range.start(), "tokens pushed out of order");
        let end = kind_range.end() + trailing.len();
        assert!(self.text.is_char_boundary(usize::from(end)));
        let text = &self.text[usize::from(start)..usize::from(end)];
        self.text_pos = end;
        self.children.push(NodeOrToken::Token(GreenToken::new(leading, kind, text, trailing)));
    }

    /// Adds a placeholder for a token the parser expected but did not find.
    pub fn missing_token(&mut self, kind: SyntaxKind, text: &str) {
        self.children.push(NodeOrToken::Token(GreenToken::missing(kind, text)));
    }

    /// Finishes building and returns the root node.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unbalanced `start_node`/`finish_node` calls");
        assert_eq!(self.text_pos, TextSize::of(self.text), "not every token was consumed");
        match self.children.pop() {
            Some(NodeOrToken::Node(root)) if self.children.is_empty() => root,
            _ => panic!("the builder must produce exactly one root node"),
        }
    }
}
