//! Trivia pieces attached to tokens.

use text_size::TextSize;
use triomphe::ThinArc;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Newline,
    LineComment,
    BlockComment,
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

/// An immutable run of trivia pieces; the empty run does not allocate.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl std::fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl Default for GreenTrivia {
    fn default() -> Self {
        Self::empty()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    pub fn contains_newline(&self) -> bool {
        self.pieces().iter().any(|piece| piece.kind == TriviaPieceKind::Newline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trivia_has_no_pieces() {
        let trivia = GreenTrivia::new(&[]);
        assert!(trivia.is_empty());
        assert_eq!(trivia.len(), TextSize::new(0));
        assert_eq!(trivia, GreenTrivia::empty());
    }

    #[test]
    fn length_sums_pieces() {
        let trivia = GreenTrivia::new(&[
            TriviaPiece::new(TriviaPieceKind::Newline, 1.into()),
            TriviaPiece::new(TriviaPieceKind::Whitespace, 4.into()),
            TriviaPiece::new(TriviaPieceKind::LineComment, 10.into()),
        ]);
        assert_eq!(trivia.len(), TextSize::new(15));
        assert!(trivia.contains_newline());
        assert_eq!(trivia.pieces().len(), 3);
    }
}
