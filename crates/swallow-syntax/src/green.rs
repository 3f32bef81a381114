//! Immutable, position-independent tree storage.

use std::fmt;

use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, NodeOrToken, SyntaxKind};

pub type Green = NodeOrToken<GreenNode, GreenToken>;

impl Green {
    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    children: Box<[Green]>,
    text_len: TextSize,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<Green>) -> Self {
        let text_len = children.iter().map(Green::text_len).sum();
        Self { data: Arc::new(GreenNodeData { kind, children: children.into(), text_len }) }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn children(&self) -> &[Green] {
        &self.data.children
    }

    pub fn text_len(&self) -> TextSize {
        self.data.text_len
    }

    /// Concatenated source text of every present token, trivia included.
    pub fn text(&self) -> String {
        let mut buf = String::with_capacity(u32::from(self.text_len()) as usize);
        self.write_text(&mut buf);
        buf
    }

    fn write_text(&self, buf: &mut String) {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => node.write_text(buf),
                NodeOrToken::Token(token) if token.is_present() => buf.push_str(token.text()),
                NodeOrToken::Token(_) => {}
            }
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("text_len", &self.text_len())
            .field("children", &self.children().len())
            .finish()
    }
}

/// Whether a token was read from the source or synthesized by recovery.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SourcePresence {
    Present,
    Missing,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    leading: GreenTrivia,
    kind: SyntaxKind,
    text: Box<str>,
    trailing: GreenTrivia,
    presence: SourcePresence,
}

impl GreenToken {
    /// A token read from source; `text` spans the leading trivia, the token
    /// itself and the trailing trivia.
    pub fn new(leading: GreenTrivia, kind: SyntaxKind, text: &str, trailing: GreenTrivia) -> Self {
        debug_assert!(leading.len() + trailing.len() <= TextSize::of(text));
        let data = GreenTokenData {
            leading,
            kind,
            text: text.into(),
            trailing,
            presence: SourcePresence::Present,
        };
        Self { data: Arc::new(data) }
    }

    /// A placeholder for a token that was expected but not found. Its text is
    /// the spelling it would have had and never counts towards the source.
    pub fn missing(kind: SyntaxKind, text: &str) -> Self {
        let data = GreenTokenData {
            leading: GreenTrivia::empty(),
            kind,
            text: text.into(),
            trailing: GreenTrivia::empty(),
            presence: SourcePresence::Missing,
        };
        Self { data: Arc::new(data) }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    pub fn presence(&self) -> SourcePresence {
        self.data.presence
    }

    pub fn is_present(&self) -> bool {
        self.data.presence == SourcePresence::Present
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.data.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.data.trailing
    }

    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn text_len(&self) -> TextSize {
        match self.presence() {
            SourcePresence::Present => TextSize::of(self.text()),
            SourcePresence::Missing => TextSize::new(0),
        }
    }

    pub fn text_trimmed(&self) -> &str {
        if !self.is_present() {
            return self.text();
        }

        let start: usize = self.leading().len().into();
        let end: usize = (TextSize::of(self.text()) - self.trailing().len()).into();

        &self.text()[start..end]
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenToken")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("presence", &self.presence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TriviaPiece, TriviaPieceKind};

    fn whitespace(len: u32) -> GreenTrivia {
        GreenTrivia::new(&[TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())])
    }

    #[test]
    fn token_text() {
        let token =
            GreenToken::new(whitespace(3), SyntaxKind::LET_KW, "\n\t let \t\t", whitespace(3));

        assert_eq!("\n\t let \t\t", token.text());
        assert_eq!("let", token.text_trimmed());
    }

    #[test]
    fn missing_token_has_no_length() {
        let token = GreenToken::missing(SyntaxKind::RIGHT_BRACE, "}");
        assert!(!token.is_present());
        assert_eq!(token.text_len(), TextSize::new(0));
        assert_eq!(token.text_trimmed(), "}");
    }

    #[test]
    fn node_text_skips_missing_tokens() {
        let node = GreenNode::new(
            SyntaxKind::CODE_BLOCK,
            vec![
                NodeOrToken::Token(GreenToken::new(
                    GreenTrivia::empty(),
                    SyntaxKind::LEFT_BRACE,
                    "{ ",
                    whitespace(1),
                )),
                NodeOrToken::Token(GreenToken::missing(SyntaxKind::RIGHT_BRACE, "}")),
            ],
        );
        assert_eq!(node.text(), "{ ");
        assert_eq!(node.text_len(), TextSize::new(2));
    }
}
