//! Positioned, parent-linked view over the green tree.

use std::fmt;
use std::rc::Rc;

use text_size::{TextRange, TextSize};

use crate::cursor::{Preorder, WalkEvent};
use crate::{GreenNode, GreenToken, SyntaxKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

#[derive(Clone)]
pub struct SyntaxNode {
    data: Rc<NodeData>,
}

struct NodeData {
    parent: Option<SyntaxNode>,
    index_in_parent: u32,
    offset: TextSize,
    green: GreenNode,
}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self::new(None, 0, TextSize::new(0), green)
    }

    fn new(
        parent: Option<SyntaxNode>,
        index_in_parent: u32,
        offset: TextSize,
        green: GreenNode,
    ) -> Self {
        Self { data: Rc::new(NodeData { parent, index_in_parent, offset, green }) }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.data.green
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        self.data.parent.clone()
    }

    /// Iterates from this node up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), SyntaxNode::parent)
    }

    /// Range covering the full text of the node, trivia included.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.data.offset, self.data.green.text_len())
    }

    /// Range from the first present token to the last present token,
    /// excluding the outermost trivia. Empty for nodes without source text.
    pub fn trimmed_range(&self) -> TextRange {
        let mut tokens = self.tokens().filter(SyntaxToken::is_present);
        let Some(first) = tokens.next() else {
            return TextRange::empty(self.data.offset);
        };
        let last = tokens.last().unwrap_or_else(|| first.clone());
        TextRange::new(first.trimmed_range().start(), last.trimmed_range().end())
    }

    pub fn text(&self) -> String {
        self.data.green.text()
    }

    /// Source text between the first and last present token.
    pub fn text_trimmed(&self) -> String {
        let range = self.trimmed_range() - self.data.offset;
        let text = self.text();
        text[range].to_string()
    }

    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        let mut offset = self.data.offset;
        self.data.green.children().iter().enumerate().map(move |(index, child)| {
            let child_offset = offset;
            offset += child.text_len();
            match child {
                NodeOrToken::Node(node) => NodeOrToken::Node(SyntaxNode::new(
                    Some(self.clone()),
                    index as u32,
                    child_offset,
                    node.clone(),
                )),
                NodeOrToken::Token(token) => NodeOrToken::Token(SyntaxToken {
                    parent: self.clone(),
                    index_in_parent: index as u32,
                    offset: child_offset,
                    green: token.clone(),
                }),
            }
        })
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_token)
    }

    pub fn first_child(&self) -> Option<SyntaxNode> {
        self.children().next()
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode> {
        let parent = self.parent()?;
        let index = self.data.index_in_parent as usize;
        parent.children_with_tokens().skip(index + 1).find_map(SyntaxElement::into_node)
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode> {
        let parent = self.parent()?;
        let index = self.data.index_in_parent as usize;
        parent.children_with_tokens().take(index).filter_map(SyntaxElement::into_node).last()
    }

    /// All nodes below and including this one, in source order.
    pub fn descendants(&self) -> impl Iterator<Item = SyntaxNode> {
        Preorder::new(self.clone()).filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    /// Every token below this node, missing tokens included, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens.into_iter()
    }

    fn collect_tokens(&self, acc: &mut Vec<SyntaxToken>) {
        for child in self.children_with_tokens() {
            match child {
                NodeOrToken::Node(node) => node.collect_tokens(acc),
                NodeOrToken::Token(token) => acc.push(token),
            }
        }
    }

    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.tokens().next()
    }

    /// `true` for placeholder nodes and for nodes made only of missing tokens.
    pub fn is_missing(&self) -> bool {
        if self.kind().is_missing_node() {
            return true;
        }
        let mut tokens = self.tokens().peekable();
        tokens.peek().is_some() && tokens.all(|token| !token.is_present())
    }

    /// Innermost node whose trimmed range starts at `offset`.
    pub fn node_starting_at(&self, offset: TextSize) -> Option<SyntaxNode> {
        self.descendants()
            .filter(|node| {
                let range = node.trimmed_range();
                range.start() == offset && !range.is_empty()
            })
            .last()
    }

    /// Tokens whose text (trivia excluded) covers `offset`.
    pub fn token_at_offset(&self, offset: TextSize) -> Option<SyntaxToken> {
        self.tokens().filter(SyntaxToken::is_present).find(|token| {
            let range = token.trimmed_range();
            range.contains(offset) || (range.is_empty() && range.start() == offset)
        })
    }
}

// Two handles are equal when they point at the same position of the same tree.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
            || (self.data.offset == other.data.offset
                && self.data.index_in_parent == other.data.index_in_parent
                && self.data.green.ptr_eq(&other.data.green)
                && self.data.parent == other.data.parent)
    }
}

impl Eq for SyntaxNode {}

impl std::hash::Hash for SyntaxNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.data.offset.hash(state);
        self.data.green.kind().hash(state);
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index_in_parent: u32,
    offset: TextSize,
    green: GreenToken,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    pub fn is_present(&self) -> bool {
        self.green.is_present()
    }

    /// Range including attached trivia.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    /// Range of the token text, trivia excluded. Missing tokens report an
    /// empty range at their position.
    pub fn trimmed_range(&self) -> TextRange {
        if !self.is_present() {
            return TextRange::empty(self.offset);
        }
        let start = self.offset + self.green.leading().len();
        TextRange::at(start, TextSize::of(self.green.text_trimmed()))
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn text_trimmed(&self) -> &str {
        self.green.text_trimmed()
    }

    pub fn index_in_parent(&self) -> usize {
        self.index_in_parent as usize
    }

    /// `true` when a newline precedes the token in its leading trivia.
    pub fn is_at_line_start(&self) -> bool {
        self.green.leading().contains_newline()
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}
