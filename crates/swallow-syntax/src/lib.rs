//! Lossless, immutable syntax tree with attached trivia and missing-token
//! placeholders.
//!
//! Green nodes are shared, position-independent storage; `SyntaxNode` adds
//! offsets and parent links on demand.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod cursor;
mod green;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a green tree.
pub use builder::Builder;
pub use cursor::{Preorder, WalkEvent};
pub use green::{Green, GreenNode, GreenToken, SourcePresence};
/// Primary syntax tree API types.
pub use syntax::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
pub use text_size::{TextRange, TextSize};
