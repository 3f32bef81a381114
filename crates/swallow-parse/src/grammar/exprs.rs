use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;

use super::{ExprFlags, atoms, closures, nth_is_name, nth_starts_expr, types};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

#[derive(Clone, Copy)]
enum Infix {
    Binary,
    Ternary,
    Cast,
    Is,
    Arrow,
}

/// Minimum binding power that stops before assignment, so that the `=` of
/// `case .some(x) = y` is left to the condition.
pub(crate) const ABOVE_ASSIGNMENT: u8 = right(1).0 + 1;

const fn left(precedence: u8) -> (u8, u8) {
    (precedence * 2, precedence * 2 + 1)
}

const fn right(precedence: u8) -> (u8, u8) {
    (precedence * 2 + 1, precedence * 2)
}

fn operator_power(text: &str) -> (u8, u8) {
    match text {
        "||" => left(5),
        "&&" => left(6),
        "==" | "!=" | "<" | "<=" | ">" | ">=" | "===" | "!==" | "~=" => left(7),
        "??" => right(8),
        "..." | "..<" => left(10),
        "+" | "-" | "&+" | "&-" | "|" | "^" => left(11),
        "*" | "/" | "%" | "&*" | "&" => left(12),
        "<<" | ">>" | "&<<" | "&>>" => left(13),
        _ if text.ends_with('=') => right(1),
        _ => left(4),
    }
}

fn infix(p: &Parser<'_>, flags: ExprFlags) -> Option<(u8, u8, Infix)> {
    if flags.contains(ExprFlags::DIRECTIVE) && p.at_line_start() {
        return None;
    }

    let (l_bp, r_bp) = match p.peek_kind() {
        EQ => right(1),
        BINARY_OPERATOR => operator_power(p.nth_text(0)),
        ARROW => return Some(with(right(2), Infix::Arrow)),
        THROWS_KW | RETHROWS_KW => return Some(with(right(2), Infix::Arrow)),
        IDENTIFIER if at_async_arrow(p) => return Some(with(right(2), Infix::Arrow)),
        INFIX_QUESTION_MARK => return Some(with(right(3), Infix::Ternary)),
        AS_KW => return Some(with(left(9), Infix::Cast)),
        IS_KW => return Some(with(left(9), Infix::Is)),
        _ => return None,
    };
    Some((l_bp, r_bp, Infix::Binary))
}

fn with((l_bp, r_bp): (u8, u8), infix: Infix) -> (u8, u8, Infix) {
    (l_bp, r_bp, infix)
}

/// `async` directly before `->` or `throws` in an arrow expression.
fn at_async_arrow(p: &Parser<'_>) -> bool {
    p.at_contextual("async") && matches!(p.nth(1), ARROW | THROWS_KW | RETHROWS_KW)
}

/// A full expression, assignment and ternary included.
pub(crate) fn expr(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    expr_bp(p, flags, 0)
}

pub(crate) fn expr_bp(p: &mut Parser<'_>, flags: ExprFlags, min_bp: u8) -> CompletedMarker {
    sequence(p, flags, min_bp).0
}

/// Precedence climbing over a sequence of operands and operators. The flag
/// reports whether the sequence ended in a missing operand, in which case
/// enclosing sequences stop too.
fn sequence(p: &mut Parser<'_>, flags: ExprFlags, min_bp: u8) -> (CompletedMarker, bool) {
    let (mut lhs, mut ends_missing) = unary(p, flags, min_bp);
    if ends_missing {
        return (lhs, true);
    }

    while let Some((l_bp, r_bp, op)) = infix(p, flags) {
        if l_bp < min_bp {
            break;
        }

        let m = lhs.precede(p);
        let kind = match op {
            Infix::Binary => {
                p.advance();
                ends_missing = sequence(p, flags, r_bp).1;
                BINARY_EXPR
            }
            Infix::Ternary => {
                p.advance();
                expr(p, flags);
                p.expect(COLON);
                ends_missing = sequence(p, flags, r_bp).1;
                TERNARY_EXPR
            }
            Infix::Cast => {
                p.advance();
                if p.at(POSTFIX_OPERATOR) && matches!(p.nth_text(0), "?" | "!") {
                    p.advance();
                }
                types::type_(p);
                CAST_EXPR
            }
            Infix::Is => {
                p.advance();
                types::type_(p);
                IS_EXPR
            }
            Infix::Arrow => {
                types::effect_specifiers(p);
                p.expect(ARROW);
                ends_missing = sequence(p, flags, r_bp).1;
                ARROW_EXPR
            }
        };
        lhs = m.complete(p, kind);

        if ends_missing {
            break;
        }
    }

    (lhs, ends_missing)
}

fn unary(p: &mut Parser<'_>, flags: ExprFlags, min_bp: u8) -> (CompletedMarker, bool) {
    match p.peek_kind() {
        PREFIX_OPERATOR if !super::nth_at_operator_ref(p, 0) => {
            let m = p.start();
            p.advance();
            let (_, ends_missing) = unary(p, flags, min_bp);
            (m.complete(p, PREFIX_EXPR), ends_missing)
        }
        TRY_KW => {
            let m = p.start();
            p.advance();
            if p.at(POSTFIX_OPERATOR) && p.nth_is_adjacent(0) {
                p.advance();
            }
            let (_, ends_missing) = sequence(p, flags, min_bp);
            (m.complete(p, TRY_EXPR), ends_missing)
        }
        IDENTIFIER if at_effect_prefix(p, "await") => {
            let m = p.start();
            p.advance_remap(AWAIT_KW);
            let (_, ends_missing) = sequence(p, flags, min_bp);
            (m.complete(p, AWAIT_EXPR), ends_missing)
        }
        IDENTIFIER if at_move(p) => {
            let m = p.start();
            p.advance_remap(MOVE_KW);
            let (_, ends_missing) = unary(p, flags, min_bp);
            (m.complete(p, MOVE_EXPR), ends_missing)
        }
        _ => {
            let lhs = postfix(p, flags);
            let missing = lhs.kind() == MISSING_EXPR;
            (lhs, missing)
        }
    }
}

/// `await` used as a keyword rather than as a plain identifier.
fn at_effect_prefix(p: &Parser<'_>, text: &str) -> bool {
    p.at_contextual(text)
        && nth_starts_expr(p, 1)
        && !p.nth_at_line_start(1)
        && !matches!(p.nth(1), PERIOD | LEFT_BRACE | LEFT_PAREN if p.nth_is_adjacent(1))
}

fn at_move(p: &Parser<'_>) -> bool {
    p.at_contextual("_move")
        && matches!(p.nth(1), IDENTIFIER | SELF_KW | DOLLAR_IDENTIFIER)
        && !p.nth_at_line_start(1)
}

/// A primary expression followed by calls, subscripts, member accesses,
/// postfix operators and trailing closures.
pub(crate) fn postfix(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    let lhs = atoms::primary(p, flags);
    if lhs.kind() == MISSING_EXPR {
        return lhs;
    }
    postfix_suffixes(p, lhs, flags)
}

pub(crate) fn postfix_suffixes(
    p: &mut Parser<'_>,
    mut lhs: CompletedMarker,
    flags: ExprFlags,
) -> CompletedMarker {
    loop {
        if flags.contains(ExprFlags::DIRECTIVE) && p.at_line_start() {
            break;
        }

        lhs = match p.peek_kind() {
            PERIOD => member_access(p, lhs),
            LEFT_PAREN if !p.at_line_start() => call(p, lhs, flags),
            LEFT_BRACKET if !p.at_line_start() => subscript(p, lhs, flags),
            POSTFIX_OPERATOR => {
                let kind = match p.nth_text(0) {
                    "!" => FORCE_UNWRAP_EXPR,
                    "?" => OPTIONAL_CHAINING_EXPR,
                    _ => POSTFIX_EXPR,
                };
                let m = lhs.precede(p);
                p.advance();
                m.complete(p, kind)
            }
            LEFT_BRACE if at_trailing_closure(p, flags) => {
                let m = lhs.precede(p);
                trailing_closures(p);
                m.complete(p, FUNCTION_CALL_EXPR)
            }
            _ => break,
        };
    }

    lhs
}

fn at_trailing_closure(p: &Parser<'_>, flags: ExprFlags) -> bool {
    p.at(LEFT_BRACE) && !p.at_line_start() && !flags.contains(ExprFlags::NO_TRAILING_CLOSURE)
}

fn member_access(p: &mut Parser<'_>, lhs: CompletedMarker) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();
    member_name(p);
    let member = m.complete(p, MEMBER_ACCESS_EXPR);
    specialize(p, member)
}

/// Name after a `.`: identifiers, keywords and tuple indices.
pub(crate) fn member_name(p: &mut Parser<'_>) {
    if nth_is_name(p, 0) || p.at(INTEGER_LITERAL) || p.at(EDITOR_PLACEHOLDER) {
        p.advance();
    } else {
        p.missing(IDENTIFIER);
    }
}

/// Wraps `base` in a specialization when generic arguments follow it.
pub(crate) fn specialize(p: &mut Parser<'_>, base: CompletedMarker) -> CompletedMarker {
    if !types::generic_arguments_ahead(p) {
        return base;
    }
    let m = base.precede(p);
    types::generic_argument_clause(p);
    m.complete(p, SPECIALIZE_EXPR)
}

const CALL_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_BRACKET, RIGHT_BRACE]);
const SUBSCRIPT_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACE]);

fn call(p: &mut Parser<'_>, lhs: CompletedMarker, flags: ExprFlags) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();
    argument_list(p, RIGHT_PAREN, &CALL_BARRIERS, flags.nested());
    p.expect(RIGHT_PAREN);
    if at_trailing_closure(p, flags) {
        trailing_closures(p);
    }
    m.complete(p, FUNCTION_CALL_EXPR)
}

fn subscript(p: &mut Parser<'_>, lhs: CompletedMarker, flags: ExprFlags) -> CompletedMarker {
    let m = lhs.precede(p);
    p.advance();
    argument_list(p, RIGHT_BRACKET, &SUBSCRIPT_BARRIERS, flags.nested());
    p.expect(RIGHT_BRACKET);
    if at_trailing_closure(p, flags) {
        trailing_closures(p);
    }
    m.complete(p, SUBSCRIPT_EXPR)
}

/// A trailing closure and any labeled ones after it.
fn trailing_closures(p: &mut Parser<'_>) {
    closures::closure(p);
    while nth_is_name(p, 0) && p.nth_at(1, COLON) && p.nth_at(2, LEFT_BRACE) && !p.at_line_start()
    {
        let m = p.start();
        p.advance();
        p.advance();
        closures::closure(p);
        m.complete(p, ADDITIONAL_TRAILING_CLOSURE);
    }
}

/// Comma separated `label: value` arguments up to `closer`, which is left
/// for the caller. An opener directly followed by the end of input still
/// gets one argument holding a missing value.
pub(crate) fn argument_list(
    p: &mut Parser<'_>,
    closer: SyntaxKind,
    barriers: &SyntaxSet,
    flags: ExprFlags,
) {
    let list = p.start();

    if !p.at(closer) {
        loop {
            let m = p.start();
            if super::at_label(p) {
                p.advance();
                p.advance();
            }
            expr(p, flags);
            let comma = p.eat(COMMA);
            m.complete(p, LABELED_ARGUMENT);

            if !comma || p.at(closer) || p.at(EOF) || p.at_set(barriers) {
                break;
            }
        }
        recovery::skip_to_closer(p, closer, barriers);
    }

    list.complete(p, ARGUMENT_LIST);
}
