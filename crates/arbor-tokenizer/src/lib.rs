mod cursor;

use arbor_errors::{Error, Result};
use arbor_syntax::TokenSequence;
pub use cursor::{Cursor, EOF_CHAR};
use text_size::TextRange;
use tracing::{debug, trace};

/// Matches one token at the cursor. Returning `None` after advancing skips
/// the consumed input, which is how whitespace is dropped. An error aborts
/// tokenization.
pub type Recognizer<T> = Box<dyn Fn(&mut Cursor<'_>) -> Result<Option<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyInput {
    /// Empty text produces an empty token sequence.
    #[default]
    Allow,
    /// Empty text is [`Error::EmptyExpression`].
    Reject,
}

/// Recognizers in registration order. Earlier ones win, so more specific
/// patterns must be registered before more general ones sharing a prefix.
pub struct Recognizers<T> {
    list: Vec<Recognizer<T>>,
}

impl<T> std::fmt::Debug for Recognizers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recognizers").field("len", &self.list.len()).finish()
    }
}

impl<T> Recognizers<T> {
    pub fn new(list: Vec<Recognizer<T>>) -> Result<Self> {
        if list.is_empty() {
            return Err(Error::InvalidFactory { index: None });
        }
        Ok(Self { list })
    }

    pub fn push(&mut self, recognizer: impl Fn(&mut Cursor<'_>) -> Option<T> + 'static) {
        self.list.push(Box::new(move |cursor: &mut Cursor<'_>| Ok(recognizer(cursor))));
    }

    /// Registers a recognizer that can reject malformed input.
    pub fn try_push(
        &mut self,
        recognizer: impl Fn(&mut Cursor<'_>) -> Result<Option<T>> + 'static,
    ) {
        self.list.push(Box::new(recognizer));
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn tokenize(&self, text: &str, empty: EmptyInput) -> Result<TokenSequence<T>> {
        tokenize(self, text, empty)
    }
}

/// Skips any run of whitespace without producing a token.
pub fn whitespace<T>() -> Recognizer<T> {
    Box::new(|cursor: &mut Cursor<'_>| {
        cursor.advance_while(char::is_whitespace);
        Ok(None)
    })
}

pub fn tokenize<T>(
    recognizers: &Recognizers<T>,
    text: &str,
    empty: EmptyInput,
) -> Result<TokenSequence<T>> {
    let mut tokens = TokenSequence::new();

    if text.is_empty() {
        return match empty {
            EmptyInput::Allow => Ok(tokens),
            EmptyInput::Reject => Err(Error::EmptyExpression),
        };
    }

    let mut cursor = Cursor::new(text);

    'text: while !cursor.is_eof() {
        let start = cursor.pos();

        for (index, recognize) in recognizers.list.iter().enumerate() {
            match recognize(&mut cursor)? {
                Some(token) => {
                    if cursor.pos() <= start {
                        return Err(Error::InvalidFactory { index: Some(index) });
                    }
                    let range = TextRange::new(start, cursor.pos());
                    trace!(index, ?range, "token recognized");
                    tokens.push(token, range);
                    continue 'text;
                }
                None if cursor.pos() > start => {
                    trace!(index, skipped = ?TextRange::new(start, cursor.pos()), "input skipped");
                    continue 'text;
                }
                None => cursor.reset(start),
            }
        }

        return Err(Error::UnexpectedToken { offset: start });
    }

    debug!(tokens = tokens.len(), bytes = text.len(), "tokenized");
    Ok(tokens)
}
