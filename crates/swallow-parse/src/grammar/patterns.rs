use swallow_syntax::SyntaxKind::*;
use swallow_syntax::SyntaxSet;

use super::exprs::{ABOVE_ASSIGNMENT, expr_bp};
use super::{ExprFlags, at_label, types};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

/// Tokens after which a lone name or `_` is a whole pattern.
const PATTERN_END: SyntaxSet = SyntaxSet::new([
    COLON,
    COMMA,
    EQ,
    WHERE_KW,
    IN_KW,
    LEFT_BRACE,
    RIGHT_PAREN,
    EOF,
]);

const TUPLE_BARRIERS: SyntaxSet = SyntaxSet::new([LEFT_BRACE, RIGHT_BRACE, RIGHT_BRACKET]);

/// Patterns of declarations, optional bindings and `for` loops.
pub(crate) fn pattern(p: &mut Parser<'_>) -> CompletedMarker {
    match p.peek_kind() {
        IDENTIFIER | SELF_KW => {
            let m = p.start();
            p.advance();
            m.complete(p, IDENTIFIER_PATTERN)
        }
        UNDERSCORE => {
            let m = p.start();
            p.advance();
            m.complete(p, WILDCARD_PATTERN)
        }
        LEFT_PAREN => tuple_pattern(p),
        LET_KW | VAR_KW => {
            let m = p.start();
            p.advance();
            pattern(p);
            m.complete(p, VALUE_BINDING_PATTERN)
        }
        _ => p.missing_node(MISSING_PATTERN),
    }
}

fn tuple_pattern(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if !p.at(RIGHT_PAREN) {
        loop {
            let element = p.start();
            if at_label(p) {
                p.advance();
                p.advance();
            }
            pattern(p);
            let comma = p.eat(COMMA);
            element.complete(p, TUPLE_PATTERN_ELEMENT);

            if !comma || p.at(RIGHT_PAREN) || p.at(EOF) {
                break;
            }
        }
        recovery::skip_to_closer(p, RIGHT_PAREN, &TUPLE_BARRIERS);
    }

    p.expect(RIGHT_PAREN);
    m.complete(p, TUPLE_PATTERN)
}

/// Patterns after `case` and `catch`: bindings, type checks and
/// expressions matched with `~=`.
pub(crate) fn case_pattern(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    match p.peek_kind() {
        LET_KW | VAR_KW => value_binding(p, flags),
        IS_KW => {
            let m = p.start();
            p.advance();
            types::type_(p);
            m.complete(p, IS_TYPE_PATTERN)
        }
        UNDERSCORE if PATTERN_END.contains(p.nth(1)) => {
            let m = p.start();
            p.advance();
            m.complete(p, WILDCARD_PATTERN)
        }
        IDENTIFIER
            if flags.contains(ExprFlags::BINDING_PATTERN) && PATTERN_END.contains(p.nth(1)) =>
        {
            let m = p.start();
            p.advance();
            m.complete(p, IDENTIFIER_PATTERN)
        }
        _ => {
            let m = p.start();
            expr_bp(p, flags, ABOVE_ASSIGNMENT);
            m.complete(p, EXPRESSION_PATTERN)
        }
    }
}

/// `let` or `var` followed by a pattern whose bare names bind.
pub(crate) fn value_binding(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    let m = p.start();
    p.advance();
    case_pattern(p, flags | ExprFlags::BINDING_PATTERN);
    m.complete(p, VALUE_BINDING_PATTERN)
}
