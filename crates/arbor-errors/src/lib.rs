use std::fmt::Display;
use std::ops::Range;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of tokenization and tree building.
///
/// Every variant aborts the whole call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("empty expression")]
    EmptyExpression,
    #[error("unexpected token")]
    UnexpectedToken { offset: TextSize },
    /// `offset` points at the character that made the literal invalid.
    #[error("incorrectly formed number")]
    IncorrectlyFormedNumber { offset: TextSize },
    #[error("no matching token found")]
    NoMatchingToken { range: TextRange },
    #[error("wrong token type")]
    WrongTokenType { range: TextRange },
    #[error("expected {expected} subexpression(s), found {got}")]
    UnexpectedSubexpressionCount { got: usize, expected: usize, range: TextRange },
    /// `index` is `None` when the recognizer list itself was empty.
    #[error("invalid token factory")]
    InvalidFactory { index: Option<usize> },
    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}

impl Error {
    pub fn range(&self) -> Option<TextRange> {
        match *self {
            Self::UnexpectedToken { offset } | Self::IncorrectlyFormedNumber { offset } => {
                Some(TextRange::empty(offset))
            }
            Self::NoMatchingToken { range }
            | Self::WrongTokenType { range }
            | Self::UnexpectedSubexpressionCount { range, .. } => Some(range),
            Self::EmptyExpression | Self::InvalidFactory { .. } | Self::NestingTooDeep { .. } => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: Option<TextRange>,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn error(message: impl Into<String>, range: impl Into<Option<TextRange>>) -> Self {
        Self { message: message.into(), range: range.into() }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        origin: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let mut message = Level::Error.title(&self.message);
        if let Some(range) = self.range {
            message = message.snippet(
                Snippet::source(text)
                    .origin(origin)
                    .annotation(Level::Error.span(span(range, text)).label("here"))
                    .fold(true),
            );
        }
        renderer.render(message)
    }
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        Self::error(error.to_string(), error.range())
    }
}

/// Empty ranges are widened to the character they point at.
fn span(range: TextRange, text: &str) -> Range<usize> {
    let Range { start, end } = range.into();
    if start != end {
        return start..end;
    }
    match text.get(start..).and_then(|rest| rest.chars().next()) {
        Some(ch) => start..start + ch.len_utf8(),
        None => start..start,
    }
}
