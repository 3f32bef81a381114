use swallow_syntax::SyntaxKind::*;
use swallow_syntax::SyntaxSet;

use super::ExprFlags;
use super::exprs::argument_list;
use crate::parser::{CompletedMarker, Parser};

/// A string literal with its segments and interpolations. An unterminated
/// literal gets a missing closing quote, and a missing raw delimiter
/// carrying the same number of `#`s as the opening one.
pub(crate) fn string_literal(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();

    let pounds = if p.at(RAW_STRING_DELIMITER) {
        let pounds = p.nth_text(0).len();
        p.advance();
        pounds
    } else {
        0
    };

    let quote = p.peek_kind();
    let quote = if quote.is_string_quote() {
        p.advance();
        quote
    } else {
        p.missing(STRING_QUOTE);
        STRING_QUOTE
    };

    let segments = p.start();
    loop {
        match p.peek_kind() {
            STRING_SEGMENT => p.advance(),
            BACKSLASH if !p.at_line_start() => interpolation(p),
            _ => break,
        }
    }
    segments.complete(p, STRING_SEGMENT_LIST);

    if p.at(quote) && !p.at_line_start() {
        p.advance();
        if pounds > 0 {
            p.expect(RAW_STRING_DELIMITER);
        }
    } else {
        p.missing(quote);
        if pounds > 0 {
            p.missing_with_text(RAW_STRING_DELIMITER, &"#".repeat(pounds));
        }
    }

    m.complete(p, STRING_LITERAL_EXPR)
}

/// `\(expr)` inside a string. Its arguments may be labeled, as in
/// `\(value, format: style)`.
fn interpolation(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(LEFT_PAREN);
    argument_list(p, RIGHT_PAREN, &SyntaxSet::EMPTY, ExprFlags::empty());
    p.expect(RIGHT_PAREN);
    m.complete(p, EXPRESSION_SEGMENT);
}
