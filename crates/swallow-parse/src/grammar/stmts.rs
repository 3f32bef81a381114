use swallow_errors::{Diagnostic, DiagnosticKind};
use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;
use text_size::TextRange;

use super::directives::{self, Clauses};
use super::{
    ExprFlags, at_stmt_start, decls, eat_contextual, exprs, patterns, skip_attributes_ahead,
};
use crate::parser::{CompletedMarker, Parser};
use crate::recovery;

const CLAUSE_END: SyntaxSet = SyntaxSet::new([POUND_ELSEIF, POUND_ELSE, POUND_ENDIF]);
const LOOP_KEYWORDS: SyntaxSet =
    SyntaxSet::new([FOR_KW, WHILE_KW, REPEAT_KW, DO_KW, IF_KW, SWITCH_KW]);

/// Where a statement list stops.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Body {
    braced: bool,
    directive: bool,
    case: bool,
}

impl Body {
    pub(crate) const FILE: Body = Body { braced: false, directive: false, case: false };
    pub(crate) const BLOCK: Body = Body { braced: true, directive: false, case: false };
    const CASE: Body = Body { braced: true, directive: true, case: true };

    /// The same body inside a `#if` clause, which also ends at the next
    /// `#elseif`, `#else` or `#endif`.
    pub(crate) fn in_directive(self) -> Body {
        Body { directive: true, ..self }
    }

    fn at_end(self, p: &Parser<'_>) -> bool {
        p.at(EOF)
            || (self.braced && p.at(RIGHT_BRACE))
            || (self.directive && p.at_set(&CLAUSE_END))
            || (self.case && at_case_boundary(p))
    }
}

fn at_item_start(p: &Parser<'_>) -> bool {
    at_stmt_start(p) && (!p.at(AT) || decls::at_decl(p))
}

/// Statements up to the end of `body`, as a `CODE_BLOCK_ITEM_LIST`.
pub(crate) fn item_list(p: &mut Parser<'_>, body: Body) -> CompletedMarker {
    let m = p.start();
    while !body.at_end(p) {
        if p.eat(SEMICOLON) {
            continue;
        }

        let start = p.position();
        if at_item_start(p) {
            statement(p);
        }
        if p.position() == start {
            recovery::skip_statement(p, |p| {
                body.at_end(p) || (p.at_line_start() && at_item_start(p))
            });
        }
    }
    m.complete(p, CODE_BLOCK_ITEM_LIST)
}

/// `{ statements }`. Without a `{` the whole block is missing.
pub(crate) fn code_block(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if p.eat(LEFT_BRACE) {
        item_list(p, Body::BLOCK);
        p.expect(RIGHT_BRACE);
    } else {
        p.missing(LEFT_BRACE);
        p.start().complete(p, CODE_BLOCK_ITEM_LIST);
        p.missing(RIGHT_BRACE);
    }
    m.complete(p, CODE_BLOCK)
}

/// The block of a control-flow statement. Junk between the header and a
/// `{` on the same line is kept as unexpected text.
fn body(p: &mut Parser<'_>) -> CompletedMarker {
    if !p.at(LEFT_BRACE) && brace_ahead_on_line(p) {
        recovery::skip_until(p, &SyntaxSet::new([LEFT_BRACE]));
    }
    code_block(p)
}

fn brace_ahead_on_line(p: &Parser<'_>) -> bool {
    let mut depth = 0u32;
    for n in 0.. {
        let kind = p.nth(n);
        if kind == EOF || kind == RIGHT_BRACE || (n > 0 && p.nth_at_line_start(n)) {
            return false;
        }
        match kind {
            LEFT_BRACE if depth == 0 => return true,
            LEFT_PAREN | LEFT_BRACKET => depth += 1,
            RIGHT_PAREN | RIGHT_BRACKET => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

pub(crate) fn statement(p: &mut Parser<'_>) -> CompletedMarker {
    match p.peek_kind() {
        IF_KW => if_stmt(p),
        GUARD_KW => guard_stmt(p),
        SWITCH_KW => switch_stmt(p),
        DO_KW => do_stmt(p),
        FOR_KW => for_stmt(p),
        WHILE_KW => while_stmt(p),
        REPEAT_KW => repeat_stmt(p),
        RETURN_KW => return_stmt(p),
        BREAK_KW => jump_stmt(p, BREAK_STMT),
        CONTINUE_KW => jump_stmt(p, CONTINUE_STMT),
        THROW_KW => {
            let m = p.start();
            p.advance();
            exprs::expr(p, ExprFlags::empty());
            m.complete(p, THROW_STMT)
        }
        DEFER_KW => {
            let m = p.start();
            p.advance();
            body(p);
            m.complete(p, DEFER_STMT)
        }
        FALLTHROUGH_KW => {
            let m = p.start();
            p.advance();
            m.complete(p, FALLTHROUGH_STMT)
        }
        POUND_IF => directives::if_config(p, Clauses::Statements),
        LET_KW | VAR_KW | FUNC_KW => decls::decl(p),
        AT | IDENTIFIER if decls::at_decl(p) => decls::decl(p),
        IDENTIFIER if p.nth_at(1, COLON) && LOOP_KEYWORDS.contains(p.nth(2)) => {
            let m = p.start();
            p.advance();
            p.advance();
            statement(p);
            m.complete(p, LABELED_STMT)
        }
        _ => exprs::expr(p, ExprFlags::empty()),
    }
}

fn if_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    condition_list(p);
    body(p);
    if p.eat(ELSE_KW) {
        if p.at(IF_KW) {
            if_stmt(p);
        } else {
            body(p);
        }
    }
    m.complete(p, IF_STMT)
}

fn guard_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    condition_list(p);
    p.expect(ELSE_KW);
    body(p);
    m.complete(p, GUARD_STMT)
}

fn condition_list(p: &mut Parser<'_>) {
    let list = p.start();
    loop {
        let element = p.start();
        condition(p);
        let comma = p.eat(COMMA);
        element.complete(p, CONDITION_ELEMENT);
        if !comma {
            break;
        }
    }
    list.complete(p, CONDITION_ELEMENT_LIST);
}

/// A boolean expression, `let x = y` or `case pattern = value`. The
/// shorthand `if let x` binds `x` to itself.
fn condition(p: &mut Parser<'_>) {
    let flags = ExprFlags::NO_TRAILING_CLOSURE;
    match p.peek_kind() {
        LET_KW | VAR_KW => {
            let m = p.start();
            p.advance();
            patterns::pattern(p);
            if p.at(COLON) {
                decls::type_annotation(p);
            }
            if p.at(EQ) {
                decls::initializer(p, flags);
            }
            m.complete(p, OPTIONAL_BINDING_CONDITION);
        }
        CASE_KW => {
            let m = p.start();
            p.advance();
            patterns::case_pattern(p, flags);
            if p.at(COLON) {
                decls::type_annotation(p);
            }
            p.expect(EQ);
            exprs::expr(p, flags);
            m.complete(p, MATCHING_PATTERN_CONDITION);
        }
        _ => {
            exprs::expr(p, flags);
        }
    }
}

fn switch_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    exprs::expr(p, ExprFlags::NO_TRAILING_CLOSURE);
    if p.expect(LEFT_BRACE) {
        switch_case_list(p, false);
        p.expect(RIGHT_BRACE);
    } else {
        p.start().complete(p, SWITCH_CASE_LIST);
        p.missing(RIGHT_BRACE);
    }
    m.complete(p, SWITCH_STMT)
}

fn at_case_start(p: &Parser<'_>) -> bool {
    match p.peek_kind() {
        CASE_KW | DEFAULT_KW => true,
        AT => matches!(p.nth(skip_attributes_ahead(p, 0)), CASE_KW | DEFAULT_KW),
        _ => false,
    }
}

/// Where the statements of one switch case stop.
fn at_case_boundary(p: &Parser<'_>) -> bool {
    at_case_start(p) || (p.at(POUND_IF) && directives::if_config_has_cases(p))
}

/// Cases of a switch, or of a `#if` clause inside one.
pub(crate) fn switch_case_list(p: &mut Parser<'_>, in_directive: bool) -> CompletedMarker {
    let m = p.start();
    loop {
        if p.at(EOF) || p.at(RIGHT_BRACE) || (in_directive && p.at_set(&CLAUSE_END)) {
            break;
        }

        if at_case_start(p) {
            switch_case(p);
        } else if p.at(POUND_IF) {
            directives::if_config(p, Clauses::SwitchCases);
        } else {
            recovery::skip_statement(p, |p| {
                p.at(RIGHT_BRACE)
                    || p.at(POUND_IF)
                    || p.at_set(&CLAUSE_END)
                    || at_case_start(p)
            });
        }
    }
    m.complete(p, SWITCH_CASE_LIST)
}

fn switch_case(p: &mut Parser<'_>) {
    let m = p.start();
    if p.at(AT) {
        decls::attribute_list(p);
    }

    let label = p.start();
    if p.eat(CASE_KW) {
        let items = p.start();
        loop {
            let item = p.start();
            patterns::case_pattern(p, ExprFlags::empty());
            if p.at(WHERE_KW) {
                where_clause(p, ExprFlags::empty());
            }
            let comma = p.eat(COMMA);
            item.complete(p, CASE_ITEM);
            if !comma {
                break;
            }
        }
        items.complete(p, CASE_ITEM_LIST);
        p.expect(COLON);
        label.complete(p, SWITCH_CASE_LABEL);
    } else {
        p.expect(DEFAULT_KW);
        p.expect(COLON);
        label.complete(p, SWITCH_DEFAULT_LABEL);
    }

    item_list(p, Body::CASE);
    m.complete(p, SWITCH_CASE);
}

fn where_clause(p: &mut Parser<'_>, flags: ExprFlags) {
    let m = p.start();
    p.advance();
    exprs::expr(p, flags);
    m.complete(p, WHERE_CLAUSE);
}

fn do_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    body(p);
    while p.at(CATCH_KW) {
        catch_clause(p);
    }
    m.complete(p, DO_STMT)
}

fn catch_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    if !p.at(LEFT_BRACE) {
        let items = p.start();
        loop {
            let item = p.start();
            patterns::case_pattern(p, ExprFlags::NO_TRAILING_CLOSURE);
            if p.at(WHERE_KW) {
                where_clause(p, ExprFlags::NO_TRAILING_CLOSURE);
            }
            let comma = p.eat(COMMA);
            item.complete(p, CATCH_ITEM);
            if !comma {
                break;
            }
        }
        items.complete(p, CATCH_ITEM_LIST);
    }
    body(p);
    m.complete(p, CATCH_CLAUSE);
}

fn for_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    let for_range = p.nth_range(0);
    p.advance();

    if c_style_ahead(p) {
        removed_c_style_for(p, for_range);
        code_block(p);
        return m.complete(p, FOR_STMT);
    }

    let flags = ExprFlags::NO_TRAILING_CLOSURE;
    p.eat(TRY_KW);
    eat_contextual(p, AWAIT_KW);
    if p.eat(CASE_KW) {
        patterns::case_pattern(p, flags);
    } else {
        patterns::pattern(p);
    }
    if p.at(COLON) {
        decls::type_annotation(p);
    }
    p.expect(IN_KW);
    exprs::expr(p, flags);
    if p.at(WHERE_KW) {
        where_clause(p, flags);
    }
    body(p);
    m.complete(p, FOR_STMT)
}

/// `for init; condition; step` has a `;` before its body.
fn c_style_ahead(p: &Parser<'_>) -> bool {
    let mut depth = 0u32;
    for n in 0.. {
        match p.nth(n) {
            EOF | RIGHT_BRACE => return false,
            LEFT_BRACE | IN_KW if depth == 0 => return false,
            SEMICOLON if depth == 0 => return true,
            LEFT_PAREN | LEFT_BRACKET => depth += 1,
            RIGHT_PAREN | RIGHT_BRACKET => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

/// Keeps the clauses of a C-style loop as unexpected text, reported as a
/// removed feature rather than as stray tokens.
fn removed_c_style_for(p: &mut Parser<'_>, for_range: TextRange) {
    let first = p.nth_range(0).start();
    if recovery::skip_until(p, &SyntaxSet::new([LEFT_BRACE])).is_some() {
        let clauses = TextRange::new(first, p.consumed_end());
        let diagnostic = Diagnostic::error(DiagnosticKind::RemovedCStyleFor, for_range)
            .with_highlight(clauses);
        p.add_override(first, diagnostic);
    }
}

fn while_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    condition_list(p);
    body(p);
    m.complete(p, WHILE_STMT)
}

fn repeat_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    body(p);
    p.expect(WHILE_KW);
    exprs::expr(p, ExprFlags::empty());
    m.complete(p, REPEAT_STMT)
}

/// `return` takes a value only when the next token can begin one.
pub(crate) fn return_stmt(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(RETURN_KW);
    if super::at_expr_start(p) {
        exprs::expr(p, ExprFlags::empty());
    }
    m.complete(p, RETURN_STMT)
}

fn jump_stmt(p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.advance();
    if p.at(IDENTIFIER) && !p.at_line_start() {
        p.advance();
    }
    m.complete(p, kind)
}
