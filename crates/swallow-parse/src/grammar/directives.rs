use swallow_syntax::SyntaxKind::*;

use super::stmts::{self, Body};
use super::{ExprFlags, exprs};
use crate::parser::{CompletedMarker, Parser};

/// What the clauses of a `#if` block contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clauses {
    Statements,
    SwitchCases,
}

/// `#if cond ... #elseif cond ... #else ... #endif`.
pub(crate) fn if_config(p: &mut Parser<'_>, clauses: Clauses) -> CompletedMarker {
    let m = p.start();
    clause(p, clauses);
    while p.at(POUND_ELSEIF) || p.at(POUND_ELSE) {
        clause(p, clauses);
    }
    p.expect(POUND_ENDIF);
    m.complete(p, IF_CONFIG_DECL)
}

fn clause(p: &mut Parser<'_>, clauses: Clauses) {
    let m = p.start();
    let has_condition = !p.at(POUND_ELSE);
    p.advance();
    if has_condition {
        exprs::expr(p, ExprFlags::DIRECTIVE);
    }

    match clauses {
        Clauses::Statements => {
            stmts::item_list(p, Body::BLOCK.in_directive());
        }
        Clauses::SwitchCases => {
            stmts::switch_case_list(p, true);
        }
    }
    m.complete(p, IF_CONFIG_CLAUSE);
}

/// Whether the `#if` block at the current position holds switch cases
/// outside any braces, which makes it part of a case list rather than of
/// the statements of the case before it.
pub(crate) fn if_config_has_cases(p: &Parser<'_>) -> bool {
    let mut nesting = 0u32;
    let mut braces = 0u32;
    for n in 1.. {
        match p.nth(n) {
            EOF => return false,
            POUND_IF => nesting += 1,
            POUND_ENDIF if nesting == 0 => return false,
            POUND_ENDIF => nesting -= 1,
            LEFT_BRACE => braces += 1,
            RIGHT_BRACE if braces == 0 => return false,
            RIGHT_BRACE => braces -= 1,
            CASE_KW | DEFAULT_KW if braces == 0 => return true,
            _ => {}
        }
    }
    false
}
