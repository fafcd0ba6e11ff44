use text_size::{TextLen, TextSize};

pub const EOF_CHAR: char = '\0';

/// Read position into the text being tokenized, handed to recognizers.
///
/// A recognizer that does not match must leave the position where it found
/// it; one that only skips input (whitespace) may advance without producing a
/// token.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    text: &'t str,
    pos: TextSize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, pos: TextSize::new(0) }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn pos(&self) -> TextSize {
        self.pos
    }

    pub(crate) fn reset(&mut self, pos: TextSize) {
        debug_assert!(self.text.is_char_boundary(pos.into()));
        self.pos = pos;
    }

    pub fn rest(&self) -> &'t str {
        &self.text[usize::from(self.pos)..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.text_len()
    }

    /// Text consumed since `start`, a position previously read from
    /// [`Cursor::pos`].
    pub fn text_since(&self, start: TextSize) -> &'t str {
        &self.text[usize::from(start)..usize::from(self.pos)]
    }

    pub fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(EOF_CHAR)
    }

    pub fn second(&self) -> char {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub fn advance(&mut self) -> char {
        match self.rest().chars().next() {
            Some(ch) => {
                self.pos += TextSize::of(ch);
                ch
            }
            None => EOF_CHAR,
        }
    }

    pub fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    pub fn eat_char(&mut self, ch: char) -> bool {
        let matches = self.peek() == ch && !self.is_eof();
        if matches {
            self.advance();
        }
        matches
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        let matches = !s.is_empty() && self.rest().starts_with(s);
        if matches {
            self.pos += s.text_len();
        }
        matches
    }

    pub fn eat_any_str(&mut self, candidates: &[&str]) -> bool {
        candidates.iter().any(|s| self.eat_str(s))
    }
}
