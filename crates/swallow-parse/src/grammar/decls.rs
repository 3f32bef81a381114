use swallow_syntax::SyntaxKind::*;
use swallow_syntax::SyntaxSet;

use super::{
    ExprFlags, exprs, is_modifier, nth_is_name, patterns, skip_attributes_ahead, stmts, types,
};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

/// Whether attributes and modifiers at the current position lead to `let`,
/// `var` or `func`.
pub(crate) fn at_decl(p: &Parser<'_>) -> bool {
    let mut n = skip_attributes_ahead(p, 0);
    while let Some(len) = modifier_len(p, n) {
        n += len;
    }
    matches!(p.nth(n), LET_KW | VAR_KW | FUNC_KW)
}

/// Token count of a modifier at the `n`th token: the name alone or the fixed
/// `name(detail)` shape. A modifier must share a line with what follows it.
fn modifier_len(p: &Parser<'_>, n: usize) -> Option<usize> {
    if !p.nth_at(n, IDENTIFIER) || !is_modifier(p.nth_text(n)) {
        return None;
    }
    let len = if p.nth_at(n + 1, LEFT_PAREN)
        && p.nth_is_adjacent(n + 1)
        && p.nth_at(n + 2, IDENTIFIER)
        && p.nth_at(n + 3, RIGHT_PAREN)
    {
        4
    } else {
        1
    };
    (!p.nth_at_line_start(n + len)).then_some(len)
}

pub(crate) fn decl(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.at(AT) {
        attribute_list(p);
    }
    while let Some(len) = modifier_len(p, 0) {
        modifier(p, len);
    }

    if p.at(FUNC_KW) {
        function(p);
        m.complete(p, FUNCTION_DECL)
    } else {
        variable(p);
        m.complete(p, VARIABLE_DECL)
    }
}

fn modifier(p: &mut Parser<'_>, len: usize) {
    let m = p.start();
    let kind = match p.nth_text(0) {
        "async" => ASYNC_KW,
        "weak" => WEAK_KW,
        "unowned" => UNOWNED_KW,
        _ => IDENTIFIER,
    };
    p.advance_remap(kind);

    for _ in 1..len {
        p.advance();
    }
    m.complete(p, DECL_MODIFIER);
}

fn variable(p: &mut Parser<'_>) {
    if !p.eat(LET_KW) {
        p.expect(VAR_KW);
    }

    let list = p.start();
    loop {
        let binding = p.start();
        patterns::pattern(p);
        if p.at(COLON) {
            type_annotation(p);
        }
        if p.at(EQ) {
            initializer(p, ExprFlags::empty());
        }
        if p.at(LEFT_BRACE) && !p.at_line_start() {
            stmts::code_block(p);
        }
        let comma = p.eat(COMMA);
        binding.complete(p, PATTERN_BINDING);

        if !comma {
            break;
        }
    }
    list.complete(p, PATTERN_BINDING_LIST);
}

pub(crate) fn type_annotation(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(COLON);
    types::type_(p);
    m.complete(p, TYPE_ANNOTATION);
}

pub(crate) fn initializer(p: &mut Parser<'_>, flags: ExprFlags) {
    let m = p.start();
    p.expect(EQ);
    exprs::expr(p, flags);
    m.complete(p, INITIALIZER_CLAUSE);
}

fn function(p: &mut Parser<'_>) {
    p.advance();
    if p.at(IDENTIFIER) || p.peek_kind().is_operator() {
        p.advance();
    } else {
        p.missing(IDENTIFIER);
    }

    let signature = p.start();
    parameter_clause(p, ParameterTypes::Required);
    types::effect_specifiers(p);
    if p.at(ARROW) {
        return_clause(p);
    }
    signature.complete(p, FUNCTION_SIGNATURE);

    if p.at(LEFT_BRACE) {
        stmts::code_block(p);
    }
}

pub(crate) fn return_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.expect(ARROW);
    types::type_(p);
    m.complete(p, RETURN_CLAUSE);
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterTypes {
    /// Function parameters: every parameter has a type.
    Required,
    /// Closure parameters: `(x, y)` is fine.
    Optional,
}

const PARAMETER_BARRIERS: SyntaxSet = SyntaxSet::new([LEFT_BRACE, RIGHT_BRACE, IN_KW]);

/// `(label name: Type = default, ...)`. A function without one gets a
/// parameter clause made only of missing parentheses.
pub(crate) fn parameter_clause(p: &mut Parser<'_>, mode: ParameterTypes) {
    let m = p.start();
    if !p.eat(LEFT_PAREN) {
        p.missing(LEFT_PAREN);
        p.missing(RIGHT_PAREN);
        m.complete(p, PARAMETER_CLAUSE);
        return;
    }

    if !p.at(RIGHT_PAREN) {
        loop {
            let comma = parameter(p, mode);
            if !comma || p.at(RIGHT_PAREN) || p.at(EOF) {
                break;
            }
        }
        recovery::skip_to_closer(p, RIGHT_PAREN, &PARAMETER_BARRIERS);
    }

    p.expect(RIGHT_PAREN);
    m.complete(p, PARAMETER_CLAUSE);
}

fn parameter(p: &mut Parser<'_>, mode: ParameterTypes) -> bool {
    let m = p.start();
    if p.at(AT) {
        attribute_list(p);
    }

    if nth_is_name(p, 0) {
        p.advance();
        if nth_is_name(p, 0) {
            p.advance();
        }
    } else if mode == ParameterTypes::Required {
        p.missing(IDENTIFIER);
    }

    if p.at(COLON) || mode == ParameterTypes::Required {
        p.expect(COLON);
        types::type_(p);
    }
    if p.at_operator("...") {
        p.advance();
    }
    if p.at(EQ) {
        let default = p.start();
        p.advance();
        exprs::expr(p, ExprFlags::empty());
        default.complete(p, DEFAULT_ARGUMENT);
    }
    let comma = p.eat(COMMA);
    m.complete(p, PARAMETER);
    comma
}

pub(crate) fn attribute_list(p: &mut Parser<'_>) {
    let m = p.start();
    while p.at(AT) {
        attribute(p);
    }
    m.complete(p, ATTRIBUTE_LIST);
}

/// `@name` with arguments when a `(` follows without a space, as in
/// `@convention(c)`. The arguments are kept as raw balanced tokens.
fn attribute(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if nth_is_name(p, 0) {
        p.advance();
    } else {
        p.missing(IDENTIFIER);
    }

    if p.at(LEFT_PAREN) && p.nth_is_adjacent(0) {
        let arguments = p.start();
        p.advance();
        while !p.at(RIGHT_PAREN) && !p.at(EOF) {
            recovery::skip_balanced(p);
        }
        p.expect(RIGHT_PAREN);
        arguments.complete(p, ATTRIBUTE_ARGUMENTS);
    }
    m.complete(p, ATTRIBUTE);
}
