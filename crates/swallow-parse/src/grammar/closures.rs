use swallow_syntax::SyntaxKind::*;
use swallow_syntax::SyntaxSet;

use super::{ExprFlags, decls, eat_contextual, exprs, nth_is_name, stmts, types};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

/// `{ [captures] (params) async throws -> T in statements }`.
pub(crate) fn closure(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(LEFT_BRACE);
    if signature_ahead(p) {
        signature(p);
    }
    stmts::item_list(p, stmts::Body::BLOCK);
    p.expect(RIGHT_BRACE);
    m.complete(p, CLOSURE_EXPR)
}

const SIGNATURE_TOKENS: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    UNDERSCORE,
    COMMA,
    COLON,
    AT,
    ARROW,
    THROWS_KW,
    RETHROWS_KW,
    PERIOD,
    INOUT_KW,
    CAPITAL_SELF_KW,
]);

/// Looks for the `in` that ends a closure signature, without leaving the
/// tokens a signature can be made of.
fn signature_ahead(p: &Parser<'_>) -> bool {
    let mut depth = 0u32;
    for n in 0.. {
        let kind = p.nth(n);
        match kind {
            EOF | LEFT_BRACE | RIGHT_BRACE => return false,
            LEFT_PAREN | LEFT_BRACKET => depth += 1,
            RIGHT_PAREN | RIGHT_BRACKET => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ if depth > 0 => {}
            IN_KW => return n > 0,
            _ if SIGNATURE_TOKENS.contains(kind) => {}
            _ if kind.is_operator() => {
                if !p.nth_text(n).bytes().all(|b| matches!(b, b'?' | b'!' | b'&' | b'<' | b'>')) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    false
}

fn signature(p: &mut Parser<'_>) {
    let m = p.start();

    if p.at(AT) {
        decls::attribute_list(p);
    }
    if p.at(LEFT_BRACKET) {
        capture_clause(p);
    }

    if p.at(LEFT_PAREN) {
        decls::parameter_clause(p, decls::ParameterTypes::Optional);
    } else if nth_is_name(p, 0) && !p.at(IN_KW) && !types::at_effect_specifiers(p) {
        let list = p.start();
        loop {
            let param = p.start();
            p.advance();
            let comma = p.eat(COMMA);
            param.complete(p, CLOSURE_PARAM);
            if !comma || !nth_is_name(p, 0) || p.at(IN_KW) {
                break;
            }
        }
        list.complete(p, CLOSURE_PARAM_LIST);
    }

    types::effect_specifiers(p);
    if p.at(ARROW) {
        decls::return_clause(p);
    }
    p.expect(IN_KW);
    m.complete(p, CLOSURE_SIGNATURE);
}

const CAPTURE_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACE, IN_KW]);

/// `[weak self, unowned(safe) x, y = z]`.
fn capture_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    if !p.at(RIGHT_BRACKET) {
        loop {
            let capture = p.start();
            if at_capture_specifier(p) {
                capture_specifier(p);
            }
            if nth_is_name(p, 0) && p.nth_at(1, EQ) {
                p.advance();
                p.advance();
            }
            exprs::expr(p, ExprFlags::empty());
            let comma = p.eat(COMMA);
            capture.complete(p, CLOSURE_CAPTURE);

            if !comma || p.at(RIGHT_BRACKET) || p.at(EOF) {
                break;
            }
        }
        recovery::skip_to_closer(p, RIGHT_BRACKET, &CAPTURE_BARRIERS);
    }

    p.expect(RIGHT_BRACKET);
    m.complete(p, CLOSURE_CAPTURE_CLAUSE);
}

fn at_capture_specifier(p: &Parser<'_>) -> bool {
    (p.at_contextual("weak") && nth_is_name(p, 1))
        || (p.at_contextual("unowned") && (nth_is_name(p, 1) || p.nth_at(1, LEFT_PAREN)))
}

fn capture_specifier(p: &mut Parser<'_>) {
    if !eat_contextual(p, WEAK_KW) {
        eat_contextual(p, UNOWNED_KW);
        if p.at(LEFT_PAREN) && p.nth_is_adjacent(0) {
            p.advance();
            if p.at(IDENTIFIER) {
                p.advance();
            }
            p.expect(RIGHT_PAREN);
        }
    }
}
