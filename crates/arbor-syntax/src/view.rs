use arbor_errors::{Error, Result};
use text_size::TextRange;

use crate::{TokenIdx, TokenRange, TokenSequence};

/// A borrowed window into a [`TokenSequence`].
///
/// Besides the range, a view tracks how many matched groups the current scan
/// is nested in, so that recursive group matching fails cleanly instead of
/// exhausting the stack.
pub struct View<'t, T> {
    tokens: &'t TokenSequence<T>,
    range: TokenRange,
    depth: u32,
    limit: u32,
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<T> std::fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("range", &self.range)
            .field("depth", &self.depth)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<'t, T> View<'t, T> {
    pub fn new(tokens: &'t TokenSequence<T>, range: TokenRange, limit: u32) -> Self {
        debug_assert!(tokens.full_range().contains_range(range));
        Self { tokens, range, depth: 0, limit }
    }

    pub fn source(&self) -> &'t TokenSequence<T> {
        self.tokens
    }

    pub fn range(&self) -> TokenRange {
        self.range
    }

    pub fn start(&self) -> TokenIdx {
        self.range.start
    }

    pub fn end(&self) -> TokenIdx {
        self.range.end
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[track_caller]
    pub fn token(&self, at: TokenIdx) -> &'t T {
        &self.tokens[at]
    }

    #[track_caller]
    pub fn text_range(&self, at: TokenIdx) -> TextRange {
        self.tokens.text_range(at)
    }

    /// Same nesting depth, different window.
    #[must_use]
    pub fn narrow(self, range: TokenRange) -> Self {
        debug_assert!(self.tokens.full_range().contains_range(range));
        Self { range, ..self }
    }

    /// One level deeper, failing once the limit is exceeded.
    pub fn descend(self) -> Result<Self> {
        let depth = self.depth + 1;
        if depth > self.limit {
            return Err(Error::NestingTooDeep { limit: self.limit });
        }
        Ok(Self { depth, ..self })
    }
}
