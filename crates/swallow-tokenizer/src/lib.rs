//! Tokenizer producing tokens with attached leading and trailing trivia.
//!
//! String literals are lexed with a mode stack so that interpolated
//! expressions come out as ordinary tokens between the string segments.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use swallow_syntax::SyntaxKind;
use swallow_syntax::SyntaxKind::*;
use swallow_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
    /// Set for the first token and for tokens preceded by a newline.
    pub at_line_start: bool,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.kind_range]
    }

    /// Range covering the token and its trivia.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(
            self.kind_range.start() - self.leading.len(),
            self.kind_range.end() + self.trailing.len(),
        )
    }
}

/// Splits `text` into tokens. The last token is always `EOF`, and the full
/// ranges of the returned tokens tile `text` without gaps.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).tokenize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringPhase {
    Open,
    Content,
    Close,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    String { pounds: usize, quote: SyntaxKind, opener: usize, phase: StringPhase },
    Interpolation { parens: u32 },
}

pub struct Tokenizer<'text> {
    text: &'text str,
    cursor: Cursor<'text>,
    modes: Vec<Mode>,
    leading: Vec<TriviaPiece>,
    tokens: Vec<Token>,
}

impl<'text> Tokenizer<'text> {
    pub fn new(text: &'text str) -> Self {
        Self {
            text,
            cursor: Cursor::new(text),
            modes: Vec::new(),
            leading: Vec::with_capacity(4),
            tokens: Vec::with_capacity(text.len() / 4),
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        loop {
            if self.in_string() {
                self.string_part();
                continue;
            }

            let mut leading = std::mem::take(&mut self.leading);
            self.trivia(false, &mut leading);
            self.leading = leading;

            if self.cursor.is_eof() {
                if self.modes.iter().any(|mode| matches!(mode, Mode::Interpolation { .. })) {
                    self.collapse_unterminated_string();
                    continue;
                }
                self.emit(EOF);
                break;
            }

            self.normal_token();
        }
        self.tokens
    }

    fn in_string(&self) -> bool {
        matches!(self.modes.last(), Some(Mode::String { .. }))
    }

    fn current_text(&self) -> &'text str {
        let range = TextRange::at(self.cursor.token_start(), self.cursor.pos_within_token());
        &self.text[range]
    }

    fn emit(&mut self, kind: SyntaxKind) {
        let kind_range = TextRange::at(self.cursor.token_start(), self.cursor.pos_within_token());
        self.cursor.reset_pos_within_token();

        let leading = GreenTrivia::new(&self.leading);
        self.leading.clear();
        let trailing = if self.in_string() { GreenTrivia::empty() } else { self.trailing_trivia() };
        let at_line_start = self.tokens.is_empty() || leading.contains_newline();

        self.tokens.push(Token { leading, kind, kind_range, trailing, at_line_start });
    }

    fn trailing_trivia(&mut self) -> GreenTrivia {
        let mut pieces = Vec::new();
        self.trivia(true, &mut pieces);
        GreenTrivia::new(&pieces)
    }

    /// Trailing trivia stops before a newline so the newline leads the next token.
    fn trivia(&mut self, trailing: bool, pieces: &mut Vec<TriviaPiece>) {
        loop {
            let kind = match self.cursor.peek() {
                '\n' | '\r' if trailing => break,
                '\n' => {
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\r' => {
                    self.cursor.advance();
                    if self.cursor.matches('\n') {
                        self.cursor.advance();
                    }
                    TriviaPieceKind::Newline
                }
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    TriviaPieceKind::LineComment
                }
                '/' if self.cursor.second() == '*' => {
                    self.block_comment();
                    TriviaPieceKind::BlockComment
                }
                c if is_horizontal_whitespace(c) && !self.cursor.is_eof() => {
                    self.cursor.advance_while(is_horizontal_whitespace);
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn block_comment(&mut self) {
        self.cursor.advance_by(2);
        let mut depth = 1u32;
        while depth > 0 && !self.cursor.is_eof() {
            if self.cursor.starts_with("/*") {
                self.cursor.advance_by(2);
                depth += 1;
            } else if self.cursor.starts_with("*/") {
                self.cursor.advance_by(2);
                depth -= 1;
            } else {
                self.cursor.advance();
            }
        }
    }

    fn normal_token(&mut self) {
        if let Some((pounds, quote)) = self.string_opener() {
            self.open_string(pounds, quote);
            return;
        }

        let kind = match self.cursor.peek() {
            '(' => {
                self.cursor.advance();
                if let Some(Mode::Interpolation { parens }) = self.modes.last_mut() {
                    *parens += 1;
                }
                LEFT_PAREN
            }
            ')' => {
                self.cursor.advance();
                let closes_interpolation = match self.modes.last_mut() {
                    Some(Mode::Interpolation { parens }) => {
                        *parens = parens.saturating_sub(1);
                        *parens == 0
                    }
                    _ => false,
                };
                if closes_interpolation {
                    self.modes.pop();
                }
                RIGHT_PAREN
            }
            '[' => self.single(LEFT_BRACKET),
            ']' => self.single(RIGHT_BRACKET),
            '{' => self.single(LEFT_BRACE),
            '}' => self.single(RIGHT_BRACE),
            ',' => self.single(COMMA),
            ':' => self.single(COLON),
            ';' => self.single(SEMICOLON),
            '@' => self.single(AT),
            '\\' => self.single(BACKSLASH),
            '#' => self.pound(),
            '`' => self.backtick_identifier(),
            '$' => {
                self.cursor.advance();
                self.cursor.advance_while(is_identifier_continue);
                DOLLAR_IDENTIFIER
            }
            first_char @ '0'..='9' => {
                self.cursor.advance();
                self.number(first_char)
            }
            '<' if self.cursor.second() == '#' => self.editor_placeholder(),
            '/' if self.regex_allowed() => match self.scan_regex(0) {
                Some(len) => {
                    self.cursor.bump_bytes(len);
                    REGEX_LITERAL
                }
                None => self.operator(),
            },
            c if is_identifier_start(c) => self.identifier(),
            c if is_operator(c) => self.operator(),
            _ => self.single(UNKNOWN),
        };

        self.emit(kind);
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.cursor.advance();
        kind
    }

    fn identifier(&mut self) -> SyntaxKind {
        self.cursor.advance();
        self.cursor.advance_while(is_identifier_continue);
        SyntaxKind::from_keyword(self.current_text()).unwrap_or(IDENTIFIER)
    }

    fn backtick_identifier(&mut self) -> SyntaxKind {
        self.cursor.advance();
        let rest = self.cursor.rest();
        let line_end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        match rest[..line_end].find('`') {
            Some(end) if end > 0 => {
                self.cursor.bump_bytes(end + 1);
                IDENTIFIER
            }
            _ => UNKNOWN,
        }
    }

    fn editor_placeholder(&mut self) -> SyntaxKind {
        let rest = &self.cursor.rest()[2..];
        let line_end = rest.find(['\n', '\r']).unwrap_or(rest.len());
        match rest[..line_end].find("#>") {
            Some(end) => {
                self.cursor.bump_bytes(2 + end + 2);
                EDITOR_PLACEHOLDER
            }
            None => self.operator(),
        }
    }

    /// `#if`-style directives, `#name` tokens, raw regex literals and bare `#`.
    fn pound(&mut self) -> SyntaxKind {
        let pounds = self.cursor.count_from(0, '#');
        if self.cursor.nth(pounds) == '/' {
            if let Some(len) = self.scan_regex(pounds) {
                self.cursor.bump_bytes(len);
                return REGEX_LITERAL;
            }
        }

        self.cursor.advance();
        if is_identifier_start(self.cursor.peek()) {
            self.cursor.advance_while(is_identifier_continue);
            return SyntaxKind::from_pound_keyword(self.current_text()).unwrap_or(POUND_IDENTIFIER);
        }
        POUND
    }

    fn regex_allowed(&self) -> bool {
        let after = self.cursor.second();
        if after.is_whitespace() || after == EOF_CHAR {
            return false;
        }
        !self.tokens.last().is_some_and(|token| can_end_expression(token.kind))
    }

    /// Byte length of a regex literal delimited by `/` and `pounds` `#`s.
    fn scan_regex(&self, pounds: usize) -> Option<usize> {
        let rest = self.cursor.rest();
        let body_start = pounds + 1;
        let closer: String = std::iter::once('/').chain(std::iter::repeat_n('#', pounds)).collect();
        let mut chars = rest[body_start..].char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '\n' | '\r' if pounds == 0 => return None,
                '/' if rest[body_start + index..].starts_with(&closer) => {
                    return Some(body_start + index + closer.len());
                }
                _ => {}
            }
        }
        None
    }

    fn operator(&mut self) -> SyntaxKind {
        let left_bound = self.left_bound();
        let dotted = self.cursor.matches('.');
        self.cursor.advance();
        loop {
            let c = self.cursor.peek();
            if !is_operator(c)
                || (c == '.' && !dotted)
                || self.cursor.starts_with("//")
                || self.cursor.starts_with("/*")
                || self.cursor.starts_with("<#")
            {
                break;
            }
            self.cursor.advance();
        }

        let right_bound = match self.cursor.peek() {
            ')' | ']' | '}' | ',' | ';' | ':' | EOF_CHAR => false,
            '.' => !left_bound,
            '/' if matches!(self.cursor.second(), '/' | '*') => false,
            peeked => !peeked.is_whitespace(),
        };

        match self.current_text() {
            "=" => EQ,
            "->" => ARROW,
            "." => PERIOD,
            "?" if !left_bound => INFIX_QUESTION_MARK,
            _ if left_bound == right_bound => BINARY_OPERATOR,
            _ if left_bound => POSTFIX_OPERATOR,
            _ => PREFIX_OPERATOR,
        }
    }

    fn left_bound(&self) -> bool {
        if !self.leading.is_empty() {
            return false;
        }
        match self.tokens.last() {
            None => false,
            Some(token) if !token.trailing.is_empty() => false,
            Some(_) => {
                let previous = self.cursor.previous();
                !previous.is_whitespace()
                    && !matches!(previous, '(' | '[' | '{' | ',' | ':' | ';' | EOF_CHAR)
            }
        }
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                    return INTEGER_LITERAL;
                }
                'x' => {
                    self.cursor.advance();
                    self.digits(true);
                    return INTEGER_LITERAL;
                }
                '0'..='9' | '_' | '.' | 'e' | 'E' => {
                    self.digits(false);
                }
                _ => return INTEGER_LITERAL,
            }
        } else {
            self.digits(false);
        }

        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            return FLOAT_LITERAL;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            return FLOAT_LITERAL;
        }

        INTEGER_LITERAL
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits(false);
        }
    }

    /// Recognizes `#*` followed by a quote. A raw `"""` only opens a
    /// multi-line literal when the same line does not close it.
    fn string_opener(&self) -> Option<(usize, SyntaxKind)> {
        let pounds = self.cursor.count_from(0, '#');
        let quote = match self.cursor.nth(pounds) {
            '\'' => SINGLE_QUOTE,
            '"' => {
                let after_pounds = &self.cursor.rest()[pounds..];
                if after_pounds.starts_with("\"\"\"")
                    && (pounds == 0 || !closes_on_same_line(&after_pounds[1..], pounds))
                {
                    MULTILINE_STRING_QUOTE
                } else {
                    STRING_QUOTE
                }
            }
            _ => return None,
        };
        Some((pounds, quote))
    }

    fn open_string(&mut self, pounds: usize, quote: SyntaxKind) {
        let opener = self.tokens.len();
        self.modes.push(Mode::String { pounds, quote, opener, phase: StringPhase::Open });
        if pounds > 0 {
            self.cursor.advance_by(pounds);
            self.emit(RAW_STRING_DELIMITER);
        }
    }

    fn set_string_phase(&mut self, new_phase: StringPhase) {
        if let Some(Mode::String { phase, .. }) = self.modes.last_mut() {
            *phase = new_phase;
        }
    }

    fn string_part(&mut self) {
        let Some(&Mode::String { pounds, quote, phase, .. }) = self.modes.last() else {
            return;
        };

        match phase {
            StringPhase::Open => {
                self.cursor.advance_by(quote_len(quote));
                self.set_string_phase(StringPhase::Content);
                self.emit(quote);
            }
            StringPhase::Close => {
                self.cursor.advance_by(pounds);
                self.modes.pop();
                self.emit(RAW_STRING_DELIMITER);
            }
            StringPhase::Content => self.string_content(pounds, quote),
        }
    }

    fn string_content(&mut self, pounds: usize, quote: SyntaxKind) {
        let multiline = quote == MULTILINE_STRING_QUOTE;
        let closer = closing_text(quote, pounds);

        if self.cursor.starts_with(&closer) {
            self.cursor.advance_by(quote_len(quote));
            if pounds > 0 {
                self.set_string_phase(StringPhase::Close);
            } else {
                self.modes.pop();
            }
            self.emit(quote);
            return;
        }

        if self.at_escape(pounds) {
            if self.cursor.nth(1 + pounds) == '(' {
                self.cursor.advance_by(1 + pounds);
                self.modes.push(Mode::Interpolation { parens: 0 });
                self.emit(BACKSLASH);
                return;
            }
            if self.cursor.rest().len() == 1 + pounds {
                self.collapse_unterminated_string();
                return;
            }
        }

        if self.cursor.is_eof() || (!multiline && at_newline(self.cursor.peek())) {
            // Unterminated; the parser reports the missing closing quote.
            self.modes.pop();
            return;
        }

        loop {
            if self.cursor.is_eof()
                || (!multiline && at_newline(self.cursor.peek()))
                || self.cursor.starts_with(&closer)
            {
                break;
            }
            if self.at_escape(pounds) {
                if self.cursor.nth(1 + pounds) == '(' || self.cursor.rest().len() == 1 + pounds {
                    break;
                }
                self.cursor.advance_by(1 + pounds);
                if multiline || !at_newline(self.cursor.peek()) {
                    self.cursor.advance();
                }
                continue;
            }
            self.cursor.advance();
        }
        self.emit(STRING_SEGMENT);
    }

    fn at_escape(&self, pounds: usize) -> bool {
        self.cursor.matches('\\') && self.cursor.count_from(1, '#') >= pounds
    }

    /// Replaces an unterminated string, from its outermost opener to the end
    /// of the input, with a single `UNKNOWN` token.
    fn collapse_unterminated_string(&mut self) {
        let opener = self.modes.iter().find_map(|mode| match *mode {
            Mode::String { opener, .. } => Some(opener),
            Mode::Interpolation { .. } => None,
        });
        self.modes.clear();
        self.leading.clear();

        let Some(first) = opener.and_then(|opener| self.tokens.drain(opener..).next()) else {
            return;
        };

        let start = first.kind_range.start();
        let end = TextSize::of(self.text.trim_end()).max(start);
        tracing::trace!(?start, ?end, "collapsing unterminated string literal");

        self.cursor.set_pos(end);
        let trailing = self.trailing_trivia();
        self.tokens.push(Token {
            leading: first.leading,
            kind: UNKNOWN,
            kind_range: TextRange::new(start, end),
            trailing,
            at_line_start: first.at_line_start,
        });
    }
}

fn closes_on_same_line(rest: &str, pounds: usize) -> bool {
    let line = rest.split(['\n', '\r']).next().unwrap_or_default();
    let closer = closing_text(STRING_QUOTE, pounds);
    line.contains(&closer)
}

fn closing_text(quote: SyntaxKind, pounds: usize) -> String {
    let quote = match quote {
        MULTILINE_STRING_QUOTE => "\"\"\"",
        SINGLE_QUOTE => "'",
        _ => "\"",
    };
    let mut closer = String::with_capacity(quote.len() + pounds);
    closer.push_str(quote);
    closer.extend(std::iter::repeat_n('#', pounds));
    closer
}

fn quote_len(quote: SyntaxKind) -> usize {
    if quote == MULTILINE_STRING_QUOTE { 3 } else { 1 }
}

fn at_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_horizontal_whitespace(c: char) -> bool {
    c.is_whitespace() && !at_newline(c)
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || (!c.is_ascii() && !c.is_whitespace())
}

fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '.' | '?'
    )
}

fn can_end_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        IDENTIFIER
            | DOLLAR_IDENTIFIER
            | UNDERSCORE
            | INTEGER_LITERAL
            | FLOAT_LITERAL
            | REGEX_LITERAL
            | EDITOR_PLACEHOLDER
            | POUND_IDENTIFIER
            | RIGHT_PAREN
            | RIGHT_BRACKET
            | RIGHT_BRACE
            | POSTFIX_OPERATOR
            | STRING_QUOTE
            | MULTILINE_STRING_QUOTE
            | SINGLE_QUOTE
            | RAW_STRING_DELIMITER
            | SELF_KW
            | CAPITAL_SELF_KW
            | SUPER_KW
            | INIT_KW
            | TRUE_KW
            | FALSE_KW
            | NIL_KW
    )
}

#[cfg(test)]
mod tests;
