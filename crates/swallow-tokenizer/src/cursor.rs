use text_size::TextSize;

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'text> {
    text: &'text str,
    pos: usize,
    token_start: usize,
}

impl<'text> Cursor<'text> {
    pub(crate) fn new(text: &'text str) -> Self {
        Self { text, pos: 0, token_start: 0 }
    }

    pub(crate) fn pos(&self) -> TextSize {
        TextSize::new(self.pos as u32)
    }

    /// Moves to an absolute byte offset and starts a new token there.
    pub(crate) fn set_pos(&mut self, pos: TextSize) {
        self.pos = pos.into();
        self.token_start = self.pos;
    }

    pub(crate) fn rest(&self) -> &'text str {
        &self.text[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos == self.text.len()
    }

    /// The character right before the cursor.
    pub(crate) fn previous(&self) -> char {
        self.text[..self.pos].chars().next_back().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn token_start(&self) -> TextSize {
        TextSize::new(self.token_start as u32)
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        TextSize::new((self.pos - self.token_start) as u32)
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.token_start = self.pos;
    }

    pub(crate) fn peek(&self) -> char {
        self.nth(0)
    }

    pub(crate) fn second(&self) -> char {
        self.nth(1)
    }

    pub(crate) fn nth(&self, n: usize) -> char {
        self.rest().chars().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        self.peek() == c
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn advance(&mut self) -> char {
        match self.rest().chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                c
            }
            None => EOF_CHAR,
        }
    }

    pub(crate) fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Skips `len` bytes; `len` must land on a char boundary.
    pub(crate) fn bump_bytes(&mut self, len: usize) {
        debug_assert!(self.text.is_char_boundary(self.pos + len));
        self.pos += len;
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    /// Counts consecutive `c` starting `skip` characters ahead.
    pub(crate) fn count_from(&self, skip: usize, c: char) -> usize {
        self.rest().chars().skip(skip).take_while(|&next| next == c).count()
    }
}
