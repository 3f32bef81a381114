use bitflags::bitflags;
use swallow_syntax::SyntaxKind::{self, *};
use swallow_syntax::SyntaxSet;

use crate::parser::Parser;

mod atoms;
pub(crate) mod closures;
pub(crate) mod decls;
mod directives;
pub(crate) mod exprs;
mod patterns;
pub(crate) mod stmts;
mod strings;
mod types;

bitflags! {
    /// Ambient mode threaded through every expression rule.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExprFlags: u8 {
        /// A `{` after the expression opens a body rather than a trailing
        /// closure, as in `if x {` or `switch y {`.
        const NO_TRAILING_CLOSURE = 1 << 0;
        /// Condition of a `#if` clause. Ends at the first line break.
        const DIRECTIVE = 1 << 1;
        /// Bare identifiers introduce bindings, as in `case let .some(x)`.
        const BINDING_PATTERN = 1 << 2;
    }
}

impl ExprFlags {
    /// Flags that survive into a parenthesized or bracketed sub-expression.
    pub(crate) fn nested(self) -> Self {
        self & Self::BINDING_PATTERN
    }
}

/// Contextual keywords that may precede `let`, `var` or `func`.
const MODIFIERS: &[&str] = &[
    "async",
    "class",
    "convenience",
    "dynamic",
    "fileprivate",
    "final",
    "indirect",
    "internal",
    "lazy",
    "mutating",
    "nonisolated",
    "nonmutating",
    "open",
    "optional",
    "override",
    "private",
    "public",
    "required",
    "static",
    "unowned",
    "weak",
];

pub(crate) fn is_modifier(text: &str) -> bool {
    MODIFIERS.contains(&text)
}

const EXPR_FIRST: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    DOLLAR_IDENTIFIER,
    UNDERSCORE,
    SELF_KW,
    CAPITAL_SELF_KW,
    SUPER_KW,
    INIT_KW,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,
    TRY_KW,
    INTEGER_LITERAL,
    FLOAT_LITERAL,
    REGEX_LITERAL,
    RAW_STRING_DELIMITER,
    STRING_QUOTE,
    MULTILINE_STRING_QUOTE,
    SINGLE_QUOTE,
    LEFT_PAREN,
    LEFT_BRACKET,
    LEFT_BRACE,
    BACKSLASH,
    PERIOD,
    PREFIX_OPERATOR,
    POUND_IDENTIFIER,
    EDITOR_PLACEHOLDER,
    AT,
]);

const STMT_KEYWORDS: SyntaxSet = SyntaxSet::new([
    LET_KW,
    VAR_KW,
    FUNC_KW,
    IF_KW,
    GUARD_KW,
    SWITCH_KW,
    DO_KW,
    FOR_KW,
    WHILE_KW,
    REPEAT_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    THROW_KW,
    DEFER_KW,
    FALLTHROUGH_KW,
    POUND_IF,
]);

/// Tokens that close an operator reference such as `+` in `reduce(0, +)`.
const OPERATOR_REF_FOLLOW: SyntaxSet = SyntaxSet::new([RIGHT_PAREN, COMMA, RIGHT_BRACKET]);

pub(crate) fn nth_starts_expr(p: &Parser<'_>, n: usize) -> bool {
    let kind = p.nth(n);
    EXPR_FIRST.contains(kind) || nth_at_operator_ref(p, n)
}

pub(crate) fn at_expr_start(p: &Parser<'_>) -> bool {
    nth_starts_expr(p, 0)
}

pub(crate) fn nth_at_operator_ref(p: &Parser<'_>, n: usize) -> bool {
    p.nth(n).is_operator() && OPERATOR_REF_FOLLOW.contains(p.nth(n + 1))
}

/// Whether the current token can begin a statement, declaration or
/// expression item.
pub(crate) fn at_stmt_start(p: &Parser<'_>) -> bool {
    p.at_set(&STMT_KEYWORDS) || at_expr_start(p)
}

/// Identifier-like tokens accepted as argument labels and member names.
pub(crate) fn nth_is_name(p: &Parser<'_>, n: usize) -> bool {
    let kind = p.nth(n);
    matches!(kind, IDENTIFIER | UNDERSCORE | DOLLAR_IDENTIFIER) || kind.is_keyword()
}

/// `label:` at the start of a tuple element or call argument.
pub(crate) fn at_label(p: &Parser<'_>) -> bool {
    nth_is_name(p, 0) && p.nth_at(1, COLON)
}

/// Index just past any attributes starting at the `n`th token.
pub(crate) fn skip_attributes_ahead(p: &Parser<'_>, mut n: usize) -> usize {
    while p.nth_at(n, AT) {
        n += 1;
        if nth_is_name(p, n) {
            n += 1;
        }
        if p.nth_at(n, LEFT_PAREN) && p.nth_is_adjacent(n) {
            n = skip_parens_ahead(p, n);
        }
    }
    n
}

/// Index just past the parenthesized group opening at the `n`th token.
pub(crate) fn skip_parens_ahead(p: &Parser<'_>, mut n: usize) -> usize {
    let mut depth = 0u32;
    loop {
        match p.nth(n) {
            LEFT_PAREN => depth += 1,
            RIGHT_PAREN => depth = depth.saturating_sub(1),
            EOF => return n,
            _ => {}
        }
        n += 1;
        if depth == 0 {
            return n;
        }
    }
}

/// Consumes `kind` when the current token is an identifier spelled like it.
pub(crate) fn eat_contextual(p: &mut Parser<'_>, kind: SyntaxKind) -> bool {
    let Some(text) = kind.fixed_text() else { return false };
    if !p.at_contextual(text) {
        return false;
    }
    p.advance_remap(kind);
    true
}
