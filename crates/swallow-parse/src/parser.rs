use drop_bomb::DropBomb;
use swallow_errors::Diagnostic;
use swallow_syntax::{Builder, GreenNode, GreenTrivia, SyntaxKind, SyntaxSet};
use swallow_tokenizer::Token;
use text_size::{TextRange, TextSize};

use SyntaxKind::*;

/// Diagnostics the parser decides itself, keyed by the start of the
/// unexpected node they replace.
pub(crate) type Overrides = Vec<(TextSize, Diagnostic)>;

pub(crate) struct Parser<'text> {
    text: &'text str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    overrides: Overrides,
}

impl<'text> Parser<'text> {
    pub(crate) fn new(text: &'text str) -> Self {
        let tokens = swallow_tokenizer::tokenize(text);
        let events = Vec::with_capacity(tokens.len() * 2);
        Self { text, tokens, pos: 0, events, overrides: Vec::new() }
    }

    fn token(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.token(n).kind
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'text str {
        self.token(n).text(self.text)
    }

    pub(crate) fn nth_range(&self, n: usize) -> TextRange {
        self.token(n).kind_range
    }

    pub(crate) fn nth_at_line_start(&self, n: usize) -> bool {
        self.token(n).at_line_start
    }

    /// `true` when no trivia separates the `n`th token from the one before.
    pub(crate) fn nth_is_adjacent(&self, n: usize) -> bool {
        let index = self.pos + n;
        if index == 0 || index >= self.tokens.len() {
            return false;
        }
        self.tokens[index].leading.is_empty() && self.tokens[index - 1].trailing.is_empty()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn at_line_start(&self) -> bool {
        self.nth_at_line_start(0)
    }

    /// Identifier spelled `text`, for contextual keywords.
    pub(crate) fn nth_at_contextual(&self, n: usize, text: &str) -> bool {
        self.nth(n) == IDENTIFIER && self.nth_text(n) == text
    }

    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.nth_at_contextual(0, text)
    }

    pub(crate) fn at_operator(&self, text: &str) -> bool {
        self.peek_kind().is_operator() && self.nth_text(0) == text
    }

    /// Position in the token stream, used to check that loops make progress.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn advance(&mut self) {
        let kind = self.peek_kind();
        self.advance_remap(kind);
    }

    /// Consumes the current token, giving it `kind` in the tree.
    pub(crate) fn advance_remap(&mut self, kind: SyntaxKind) {
        if self.at(EOF) {
            return;
        }

        let mut token = self.tokens[self.pos].clone();
        token.kind = kind;
        self.events.push(Event::Token(token));
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    /// Consumes `kind` or records it as missing.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.missing(kind);
        false
    }

    pub(crate) fn missing(&mut self, kind: SyntaxKind) {
        self.missing_with_text(kind, kind.fixed_text().unwrap_or_default());
    }

    pub(crate) fn missing_with_text(&mut self, kind: SyntaxKind, text: &str) {
        self.events.push(Event::Missing { kind, text: text.into() });
    }

    /// An empty placeholder node such as `MISSING_EXPR`.
    pub(crate) fn missing_node(&mut self, kind: SyntaxKind) -> CompletedMarker {
        debug_assert!(kind.is_missing_node());
        self.start().complete(self, kind)
    }

    /// Splits the current token after `len` bytes so that its head can be
    /// consumed on its own, as when `>>` closes two generic clauses.
    pub(crate) fn split_current(&mut self, len: TextSize, head: SyntaxKind, rest: SyntaxKind) {
        let token = &self.tokens[self.pos];
        let range = token.kind_range;
        debug_assert!(len > TextSize::new(0) && len < range.len());

        let split_at = range.start() + len;
        let first = Token {
            leading: token.leading.clone(),
            kind: head,
            kind_range: TextRange::new(range.start(), split_at),
            trailing: GreenTrivia::empty(),
            at_line_start: token.at_line_start,
        };
        let second = Token {
            leading: GreenTrivia::empty(),
            kind: rest,
            kind_range: TextRange::new(split_at, range.end()),
            trailing: token.trailing.clone(),
            at_line_start: false,
        };

        self.tokens[self.pos] = first;
        self.tokens.insert(self.pos + 1, second);
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Full range of a consumed token, trailing trivia included.
    pub(crate) fn consumed_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .map_or(TextSize::new(0), |index| {
                let token = &self.tokens[index];
                token.kind_range.end() + token.trailing.len()
            })
    }

    pub(crate) fn add_override(&mut self, unexpected_start: TextSize, diagnostic: Diagnostic) {
        self.overrides.push((unexpected_start, diagnostic));
    }

    /// Consumes the end-of-file token so its leading trivia lands in the tree.
    pub(crate) fn finish_eof(&mut self) {
        debug_assert!(self.at(EOF), "input left unparsed");
        let token = self.tokens[self.tokens.len() - 1].clone();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn build_tree(self) -> (GreenNode, Overrides) {
        let Parser { text, tokens: _, pos: _, mut events, overrides } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => builder.finish_node(),
                Event::Token(Token { leading, kind, kind_range, trailing, .. }) => {
                    builder.token(leading, kind, kind_range, trailing);
                }
                Event::Missing { kind, text } => builder.missing_token(kind, &text),
            }
        }

        (builder.finish(), overrides)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Missing { kind: SyntaxKind, text: Box<str> },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Self {
        Self { position: pos, bomb: DropBomb::new("Marker must be either completed or abandoned") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => *slot = kind,
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position, kind)
    }

    /// Drops the marker without creating a node.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();

        let idx = self.position as usize;
        if idx == p.events.len() - 1 {
            p.events.pop();
        }
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
    kind: SyntaxKind,
}

impl CompletedMarker {
    fn new(pos: u32, kind: SyntaxKind) -> Self {
        Self { pos, kind }
    }

    pub(crate) fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
