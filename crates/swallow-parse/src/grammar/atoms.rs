use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;

use super::exprs::{self, argument_list, member_name, specialize};
use super::{ExprFlags, at_label, closures, nth_at_operator_ref, patterns, strings, types};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

const OBJECT_LITERALS: &[&str] = &["#colorLiteral", "#imageLiteral", "#fileLiteral"];

const PAREN_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_BRACKET, RIGHT_BRACE]);
const BRACKET_BARRIERS: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, RIGHT_BRACE]);
const ELEMENT_LIST_END: SyntaxSet =
    SyntaxSet::new([RIGHT_BRACKET, RIGHT_PAREN, RIGHT_BRACE, EOF]);

pub(crate) fn primary(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    match p.peek_kind() {
        IDENTIFIER if types::at_some_or_any(p) => type_expr(p),
        IDENTIFIER | DOLLAR_IDENTIFIER | SELF_KW | CAPITAL_SELF_KW | SUPER_KW | INIT_KW => {
            identifier(p, flags)
        }
        UNDERSCORE => token_expr(p, DISCARD_EXPR),
        TRUE_KW | FALSE_KW => token_expr(p, BOOLEAN_LITERAL_EXPR),
        NIL_KW => token_expr(p, NIL_LITERAL_EXPR),
        INTEGER_LITERAL => token_expr(p, INTEGER_LITERAL_EXPR),
        FLOAT_LITERAL => token_expr(p, FLOAT_LITERAL_EXPR),
        REGEX_LITERAL => token_expr(p, REGEX_LITERAL_EXPR),
        EDITOR_PLACEHOLDER => token_expr(p, EDITOR_PLACEHOLDER_EXPR),
        RAW_STRING_DELIMITER | STRING_QUOTE | MULTILINE_STRING_QUOTE | SINGLE_QUOTE => {
            strings::string_literal(p)
        }
        LEFT_PAREN => tuple(p, flags.nested()),
        LEFT_BRACKET => collection(p, flags.nested()),
        LEFT_BRACE => closures::closure(p),
        BACKSLASH => key_path(p),
        PERIOD => implicit_member(p),
        POUND_IDENTIFIER => pound_expr(p, flags),
        AT => type_expr(p),
        LET_KW | VAR_KW => {
            let m = p.start();
            patterns::value_binding(p, flags);
            m.complete(p, PATTERN_EXPR)
        }
        _ if nth_at_operator_ref(p, 0) => token_expr(p, OPERATOR_REF_EXPR),
        _ => p.missing_node(MISSING_EXPR),
    }
}

fn token_expr(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.advance();
    m.complete(p, kind)
}

fn type_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    types::type_(p);
    m.complete(p, TYPE_EXPR)
}

fn identifier(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    if flags.contains(ExprFlags::BINDING_PATTERN) && at_binding_name(p) {
        let m = p.start();
        let name = p.start();
        p.advance();
        name.complete(p, IDENTIFIER_PATTERN);
        return m.complete(p, PATTERN_EXPR);
    }

    let m = p.start();
    p.advance();
    let name = m.complete(p, IDENTIFIER_EXPR);
    specialize(p, name)
}

/// A bare name in a binding pattern, as opposed to the start of a member
/// access or call such as `Foo.bar(x)`.
fn at_binding_name(p: &Parser<'_>) -> bool {
    p.at(IDENTIFIER)
        && !(p.nth_is_adjacent(1)
            && (matches!(p.nth(1), PERIOD | LEFT_PAREN) || p.nth_text(1).starts_with('<')))
}

fn tuple(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    let m = p.start();
    p.advance();

    let list = p.start();
    if !p.at(RIGHT_PAREN) {
        loop {
            let element = p.start();
            if at_label(p) {
                p.advance();
                p.advance();
            }
            exprs::expr(p, flags);
            let comma = p.eat(COMMA);
            element.complete(p, TUPLE_ELEMENT);

            if !comma || p.at_set(&ELEMENT_LIST_END) {
                break;
            }
        }
        recovery::skip_to_closer(p, RIGHT_PAREN, &PAREN_BARRIERS);
    }
    list.complete(p, TUPLE_ELEMENT_LIST);

    p.expect(RIGHT_PAREN);
    m.complete(p, TUPLE_EXPR)
}

/// Array and dictionary literals. The first element decides which: a `:`
/// after it makes a dictionary.
fn collection(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if p.at(RIGHT_BRACKET) {
        p.start().complete(p, ARRAY_ELEMENT_LIST);
        p.advance();
        return m.complete(p, ARRAY_EXPR);
    }
    if p.at(COLON) && p.nth_at(1, RIGHT_BRACKET) {
        p.advance();
        p.start().complete(p, DICTIONARY_ELEMENT_LIST);
        p.advance();
        return m.complete(p, DICTIONARY_EXPR);
    }

    let list = p.start();
    let mut dictionary = None;
    loop {
        let element = p.start();
        exprs::expr(p, flags);
        let is_dictionary = *dictionary.get_or_insert(p.at(COLON));
        if is_dictionary {
            p.expect(COLON);
            exprs::expr(p, flags);
        }
        let comma = p.eat(COMMA);
        element.complete(p, if is_dictionary { DICTIONARY_ELEMENT } else { ARRAY_ELEMENT });

        if !comma || p.at_set(&ELEMENT_LIST_END) {
            break;
        }
    }
    recovery::skip_to_closer(p, RIGHT_BRACKET, &BRACKET_BARRIERS);

    let is_dictionary = dictionary.unwrap_or(false);
    list.complete(p, if is_dictionary { DICTIONARY_ELEMENT_LIST } else { ARRAY_ELEMENT_LIST });
    p.expect(RIGHT_BRACKET);
    m.complete(p, if is_dictionary { DICTIONARY_EXPR } else { ARRAY_EXPR })
}

fn implicit_member(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    member_name(p);
    let member = m.complete(p, IMPLICIT_MEMBER_EXPR);
    specialize(p, member)
}

/// `\Root.path`, `\.path` or `\(Tuple).0`. When nothing usable follows the
/// root the path itself is reported missing.
fn key_path(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    let named_root = match p.peek_kind() {
        PERIOD => false,
        IDENTIFIER | CAPITAL_SELF_KW => {
            let root = types::simple_type(p, false);
            types::optional_suffixes(p, root);
            true
        }
        LEFT_PAREN => {
            tuple(p, ExprFlags::empty());
            false
        }
        _ => {
            p.missing_node(MISSING_TYPE);
            false
        }
    };

    if p.at(PERIOD) {
        key_path_components(p);
    } else if named_root && at_key_path_expression(p) {
        exprs::postfix(p, ExprFlags::empty());
    } else {
        p.missing_node(MISSING_EXPR);
    }

    m.complete(p, KEY_PATH_EXPR)
}

/// A root followed by another name that is directly applied, as in `\a`
/// on one line and `c[0]` on the next.
fn at_key_path_expression(p: &Parser<'_>) -> bool {
    p.at(IDENTIFIER)
        && p.nth_is_adjacent(1)
        && matches!(p.nth(1), LEFT_BRACKET | LEFT_PAREN | PERIOD)
}

fn key_path_components(p: &mut Parser<'_>) {
    let list = p.start();
    loop {
        let component = p.start();
        match p.peek_kind() {
            PERIOD => {
                p.advance();
                if p.at(LEFT_BRACKET) {
                    key_path_subscript(p);
                } else {
                    member_name(p);
                }
            }
            POSTFIX_OPERATOR if matches!(p.nth_text(0), "?" | "!") => p.advance(),
            LEFT_BRACKET if p.nth_is_adjacent(0) => key_path_subscript(p),
            _ => {
                component.abandon(p);
                break;
            }
        }
        component.complete(p, KEY_PATH_COMPONENT);
    }
    list.complete(p, KEY_PATH_COMPONENT_LIST);
}

fn key_path_subscript(p: &mut Parser<'_>) {
    p.advance();
    argument_list(p, RIGHT_BRACKET, &BRACKET_BARRIERS, ExprFlags::empty());
    p.expect(RIGHT_BRACKET);
}

fn pound_expr(p: &mut Parser<'_>, flags: ExprFlags) -> CompletedMarker {
    let text = p.nth_text(0);
    let m = p.start();
    p.advance();

    if text == "#keyPath" {
        pound_key_path(p);
        return m.complete(p, MACRO_EXPANSION_EXPR);
    }

    if p.at(LEFT_PAREN) && !p.at_line_start() {
        p.advance();
        argument_list(p, RIGHT_PAREN, &PAREN_BARRIERS, flags.nested());
        p.expect(RIGHT_PAREN);
    }
    let kind =
        if OBJECT_LITERALS.contains(&text) { OBJECT_LITERAL_EXPR } else { MACRO_EXPANSION_EXPR };
    m.complete(p, kind)
}

/// `#keyPath(a.b.c)` takes a dotted name rather than arguments.
fn pound_key_path(p: &mut Parser<'_>) {
    if !p.expect(LEFT_PAREN) {
        return;
    }

    loop {
        if p.at(IDENTIFIER) || p.at(SELF_KW) {
            p.advance();
        } else {
            p.missing(IDENTIFIER);
        }
        if !(p.at(PERIOD) && !p.at_line_start()) {
            break;
        }
        p.advance();
    }
    p.expect(RIGHT_PAREN);
}
