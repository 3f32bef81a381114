//! Resynchronization helpers shared by the grammar.
//!
//! Skipped tokens are never dropped: they are wrapped in an `UNEXPECTED`
//! node at the position where they occur, and the diagnostics pass later
//! describes them. Every helper that skips consumes at least one token or
//! stops, so recovery loops always make progress.

use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;

use crate::parser::{CompletedMarker, Parser};

const OPENERS: SyntaxSet = SyntaxSet::new([LEFT_PAREN, LEFT_BRACKET, LEFT_BRACE]);
const CLOSERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACKET, RIGHT_BRACE]);

/// Consumes the current token, and the rest of the bracketed group if it
/// opens one.
pub(crate) fn skip_balanced(p: &mut Parser<'_>) {
    if !p.at_set(&OPENERS) {
        p.advance();
        return;
    }

    let mut depth = 0u32;
    loop {
        match p.peek_kind() {
            EOF => return,
            kind if OPENERS.contains(kind) => depth += 1,
            kind if CLOSERS.contains(kind) => depth -= 1,
            _ => {}
        }
        p.advance();
        if depth == 0 {
            return;
        }
    }
}

/// Looks ahead for `closer` at the current nesting level, giving up at a
/// token from `barriers` or at the end of input. Unmatched closers of other
/// kinds are stepped over.
pub(crate) fn closer_ahead(p: &Parser<'_>, closer: SyntaxKind, barriers: &SyntaxSet) -> bool {
    let mut depth = 0u32;
    for n in 0.. {
        let kind = p.nth(n);
        if kind == EOF {
            return false;
        }
        if depth == 0 {
            if kind == closer {
                return true;
            }
            if barriers.contains(kind) {
                return false;
            }
        }
        if OPENERS.contains(kind) {
            depth += 1;
        } else if CLOSERS.contains(kind) {
            depth = depth.saturating_sub(1);
        }
    }
    false
}

/// Wraps tokens up to (not including) one in `stop` into an `UNEXPECTED`
/// node. Returns `None` when nothing was skipped.
pub(crate) fn skip_until(p: &mut Parser<'_>, stop: &SyntaxSet) -> Option<CompletedMarker> {
    if p.at_set(stop) || p.at(EOF) {
        return None;
    }

    let m = p.start();
    let start = p.position();
    while !p.at_set(stop) && !p.at(EOF) {
        skip_balanced(p);
    }
    tracing::trace!(skipped = p.position() - start, "resynchronized before {:?}", p.peek_kind());
    Some(m.complete(p, UNEXPECTED))
}

/// Skips unexpected text in a delimited list when `closer` can still be
/// found; otherwise leaves the input for an enclosing construct.
pub(crate) fn skip_to_closer(p: &mut Parser<'_>, closer: SyntaxKind, barriers: &SyntaxSet) {
    if !p.at(closer) && closer_ahead(p, closer, barriers) {
        skip_until(p, &SyntaxSet::new([closer]));
    }
}

/// Statement-level recovery: skips at least one token, then everything up
/// to the end of input or a position where `at_boundary` holds.
pub(crate) fn skip_statement(
    p: &mut Parser<'_>,
    at_boundary: impl Fn(&Parser<'_>) -> bool,
) -> CompletedMarker {
    let m = p.start();
    let start = p.position();
    loop {
        skip_balanced(p);
        if p.at(EOF) || at_boundary(p) {
            break;
        }
    }
    tracing::trace!(skipped = p.position() - start, "skipped unexpected statement");
    m.complete(p, UNEXPECTED)
}
