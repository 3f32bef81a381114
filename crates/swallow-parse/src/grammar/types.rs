use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;
use text_size::TextSize;

use super::{decls, eat_contextual, nth_is_name};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

const TYPE_FIRST: SyntaxSet =
    SyntaxSet::new([IDENTIFIER, CAPITAL_SELF_KW, LEFT_PAREN, LEFT_BRACKET, AT, INOUT_KW]);

pub(crate) fn nth_starts_type(p: &Parser<'_>, n: usize) -> bool {
    TYPE_FIRST.contains(p.nth(n))
}

/// A type, including `A & B` compositions.
pub(crate) fn type_(p: &mut Parser<'_>) -> CompletedMarker {
    let first = non_composed(p);
    if !at_composition(p) {
        return first;
    }

    let m = first.precede(p);
    while at_composition(p) {
        p.advance();
        non_composed(p);
    }
    m.complete(p, COMPOSITION_TYPE)
}

fn at_composition(p: &Parser<'_>) -> bool {
    p.at(BINARY_OPERATOR) && p.nth_text(0) == "&"
}

fn non_composed(p: &mut Parser<'_>) -> CompletedMarker {
    let ty = match p.peek_kind() {
        AT | INOUT_KW => {
            let m = p.start();
            if p.at(AT) {
                decls::attribute_list(p);
            }
            p.eat(INOUT_KW);
            non_composed(p);
            return m.complete(p, ATTRIBUTED_TYPE);
        }
        IDENTIFIER if at_some_or_any(p) => {
            let m = p.start();
            let kind = if p.at_contextual("some") { SOME_KW } else { ANY_KW };
            p.advance_remap(kind);
            non_composed(p);
            return m.complete(p, SOME_OR_ANY_TYPE);
        }
        IDENTIFIER | CAPITAL_SELF_KW => simple_type(p, true),
        LEFT_BRACKET => collection_type(p),
        LEFT_PAREN => tuple_or_function_type(p),
        _ => return p.missing_node(MISSING_TYPE),
    };
    optional_suffixes(p, ty)
}

/// `some P` or `any P` at the current position.
pub(crate) fn at_some_or_any(p: &Parser<'_>) -> bool {
    (p.at_contextual("some") || p.at_contextual("any"))
        && nth_starts_type(p, 1)
        && !p.nth_at_line_start(1)
}

/// A named type with its generic arguments, followed by `.Member` types
/// when `members` is set.
pub(crate) fn simple_type(p: &mut Parser<'_>, members: bool) -> CompletedMarker {
    let m = p.start();
    p.advance();
    if at_adjacent_angle(p) {
        generic_argument_clause(p);
    }
    let mut ty = m.complete(p, SIMPLE_TYPE);

    while members && p.at(PERIOD) && nth_is_name(p, 1) {
        let m = ty.precede(p);
        p.advance();
        p.advance();
        if at_adjacent_angle(p) {
            generic_argument_clause(p);
        }
        ty = m.complete(p, MEMBER_TYPE);
    }
    ty
}

fn at_adjacent_angle(p: &Parser<'_>) -> bool {
    p.peek_kind().is_operator() && p.nth_text(0).starts_with('<') && p.nth_is_adjacent(0)
}

/// Wraps `ty` for each directly attached `?` or `!`.
pub(crate) fn optional_suffixes(p: &mut Parser<'_>, mut ty: CompletedMarker) -> CompletedMarker {
    loop {
        if !p.peek_kind().is_operator() || !p.nth_is_adjacent(0) {
            return ty;
        }
        let text = p.nth_text(0);
        let kind = match text.as_bytes().first() {
            Some(b'?') => OPTIONAL_TYPE,
            Some(b'!') => IMPLICITLY_UNWRAPPED_TYPE,
            _ => return ty,
        };
        if !text.bytes().all(|b| b == b'?' || b == b'!') {
            return ty;
        }
        if text.len() > 1 {
            let rest = p.peek_kind();
            p.split_current(TextSize::new(1), POSTFIX_OPERATOR, rest);
        }

        let m = ty.precede(p);
        p.advance();
        ty = m.complete(p, kind);
    }
}

const BRACKET_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACE]);
const PAREN_BARRIERS: SyntaxSet = SyntaxSet::new([LEFT_BRACE, RIGHT_BRACE, RIGHT_BRACKET]);

fn collection_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    type_(p);
    let kind = if p.eat(COLON) {
        type_(p);
        DICTIONARY_TYPE
    } else {
        ARRAY_TYPE
    };
    recovery::skip_to_closer(p, RIGHT_BRACKET, &BRACKET_BARRIERS);
    p.expect(RIGHT_BRACKET);
    m.complete(p, kind)
}

fn tuple_or_function_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if !p.at(RIGHT_PAREN) {
        loop {
            let element = p.start();
            if nth_is_name(p, 0) && p.nth_at(1, COLON) {
                p.advance();
                p.advance();
            } else if nth_is_name(p, 0) && nth_is_name(p, 1) && p.nth_at(2, COLON) {
                p.advance();
                p.advance();
                p.advance();
            }
            type_(p);
            if p.at_operator("...") {
                p.advance();
            }
            let comma = p.eat(COMMA);
            element.complete(p, TUPLE_TYPE_ELEMENT);

            if !comma || p.at(RIGHT_PAREN) || p.at(EOF) {
                break;
            }
        }
    }
    recovery::skip_to_closer(p, RIGHT_PAREN, &PAREN_BARRIERS);
    p.expect(RIGHT_PAREN);

    if !at_effect_specifiers(p) && !p.at(ARROW) {
        return m.complete(p, TUPLE_TYPE);
    }
    effect_specifiers(p);
    p.expect(ARROW);
    type_(p);
    m.complete(p, FUNCTION_TYPE)
}

pub(crate) fn at_effect_specifiers(p: &Parser<'_>) -> bool {
    p.at_contextual("async") || p.at(THROWS_KW) || p.at(RETHROWS_KW)
}

/// `async`, `throws` or `rethrows`, in either order.
pub(crate) fn effect_specifiers(p: &mut Parser<'_>) {
    if !at_effect_specifiers(p) {
        return;
    }

    let m = p.start();
    loop {
        if eat_contextual(p, ASYNC_KW) || p.eat(THROWS_KW) || p.eat(RETHROWS_KW) {
            continue;
        }
        break;
    }
    m.complete(p, EFFECT_SPECIFIERS);
}

/// `<T, U>` after a type or expression name. The current token starts with
/// `<`; angle brackets fused with other operator characters are split off.
pub(crate) fn generic_argument_clause(p: &mut Parser<'_>) {
    let m = p.start();
    split_head(p, LEFT_ANGLE);

    loop {
        let argument = p.start();
        type_(p);
        let comma = p.eat(COMMA);
        argument.complete(p, GENERIC_ARGUMENT);
        if !comma {
            break;
        }
    }

    if p.peek_kind().is_operator() && p.nth_text(0).starts_with('>') {
        split_head(p, RIGHT_ANGLE);
    } else {
        p.missing(RIGHT_ANGLE);
    }
    m.complete(p, GENERIC_ARGUMENT_CLAUSE);
}

/// Consumes the first character of an operator token as `head`.
fn split_head(p: &mut Parser<'_>, head: SyntaxKind) {
    let text = p.nth_text(0);
    if text.len() > 1 {
        let rest = if text[1..].bytes().all(|b| b == b'?' || b == b'!') {
            POSTFIX_OPERATOR
        } else {
            p.peek_kind()
        };
        p.split_current(TextSize::new(1), head, rest);
    }
    p.advance_remap(head);
}

const GENERIC_ARGUMENT_TOKENS: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    CAPITAL_SELF_KW,
    COMMA,
    COLON,
    PERIOD,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    ARROW,
    AT,
    THROWS_KW,
    INOUT_KW,
    UNDERSCORE,
    INTEGER_LITERAL,
]);

const GENERIC_ARGUMENT_FOLLOW: SyntaxSet = SyntaxSet::new([
    LEFT_PAREN,
    PERIOD,
    RIGHT_PAREN,
    RIGHT_BRACKET,
    COMMA,
    COLON,
    SEMICOLON,
    RIGHT_BRACE,
    LEFT_BRACE,
    EOF,
]);

/// Whether a `<` directly after an expression name opens generic arguments
/// rather than a comparison, as in `Array<Int>()` versus `a<b`.
pub(crate) fn generic_arguments_ahead(p: &Parser<'_>) -> bool {
    if !at_adjacent_angle(p) {
        return false;
    }

    let mut depth = 0u32;
    let mut n = 0;
    loop {
        let kind = p.nth(n);
        if kind.is_operator() {
            let text = p.nth_text(n);
            for (index, c) in text.char_indices() {
                match c {
                    '<' => depth += 1,
                    '>' => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            let rest = &text[index + 1..];
                            if rest.is_empty() {
                                return follows_generic_arguments(p, n + 1);
                            }
                            return rest.starts_with(['?', '!', '.']);
                        }
                    }
                    '?' | '!' | '&' | '.' => {}
                    _ => return false,
                }
            }
        } else if !GENERIC_ARGUMENT_TOKENS.contains(kind) {
            return false;
        }
        n += 1;
    }
}

fn follows_generic_arguments(p: &Parser<'_>, n: usize) -> bool {
    let kind = p.nth(n);
    GENERIC_ARGUMENT_FOLLOW.contains(kind)
        || p.nth_at_line_start(n)
        || kind == POSTFIX_OPERATOR
        || (kind == BINARY_OPERATOR && matches!(p.nth_text(n), "==" | "!="))
}
