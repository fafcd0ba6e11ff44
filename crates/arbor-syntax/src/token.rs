use std::ops::Index;

use arbor_errors::Result;
use text_size::TextRange;

use crate::View;

/// Capabilities the tree builder needs from a token.
///
/// The builder never inspects tokens itself: it only asks them how they rank
/// against each other, how far to skip when scanning, and which sub-ranges
/// become their children.
pub trait Token: Sized {
    /// Whether `self` binds tighter than `other`, i.e. belongs lower in the
    /// tree when both compete for the root of the same range.
    fn is_precedent(&self, other: &Self) -> Result<bool>;

    /// Position of the token that follows `self`, which sits at `at`.
    ///
    /// Delimiters return the position past their matched partner, which
    /// hides the group's contents from the caller's scan.
    fn next_token(&self, view: View<'_, Self>, at: TokenIdx) -> Result<TokenIdx>;

    /// Pushes the ranges that become children of `self` when it is chosen as
    /// the root of `view`.
    fn split(&self, view: View<'_, Self>, at: TokenIdx, out: &mut Vec<TokenRange>) -> Result<()>;

    /// Runs once over the whole sequence after tokenization and before
    /// parsing.
    fn backpatch(tokens: &mut [Self]) {
        let _ = tokens;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenIdx(u32);

impl TokenIdx {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for TokenIdx {
    fn from(index: usize) -> Self {
        Self(index.try_into().expect("token index overflow"))
    }
}

/// Half-open range of token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenRange {
    pub start: TokenIdx,
    pub end: TokenIdx,
}

impl TokenRange {
    pub fn new(start: TokenIdx, end: TokenIdx) -> Self {
        debug_assert!(start <= end, "inverted token range {start:?}..{end:?}");
        Self { start, end }
    }

    pub fn empty(at: TokenIdx) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    pub fn len(self) -> usize {
        self.end.index().saturating_sub(self.start.index())
    }

    pub fn contains(self, idx: TokenIdx) -> bool {
        self.start <= idx && idx < self.end
    }

    pub fn contains_range(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn positions(self) -> impl Iterator<Item = TokenIdx> {
        (self.start.0..self.end.0).map(TokenIdx)
    }
}

/// Tokens in source order, each with the text it was recognized from.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSequence<T> {
    tokens: Vec<T>,
    ranges: Vec<TextRange>,
}

impl<T> Default for TokenSequence<T> {
    fn default() -> Self {
        Self { tokens: Vec::new(), ranges: Vec::new() }
    }
}

impl<T> TokenSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: T, range: TextRange) -> TokenIdx {
        let idx = TokenIdx::from(self.tokens.len());
        self.tokens.push(token);
        self.ranges.push(range);
        idx
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.ranges.clear();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut [T] {
        &mut self.tokens
    }

    pub fn get(&self, idx: TokenIdx) -> Option<&T> {
        self.tokens.get(idx.index())
    }

    #[track_caller]
    pub fn text_range(&self, idx: TokenIdx) -> TextRange {
        self.ranges[idx.index()]
    }

    pub fn full_range(&self) -> TokenRange {
        TokenRange::new(TokenIdx::new(0), TokenIdx::from(self.tokens.len()))
    }

    /// A view over the whole sequence that allows `limit` levels of nested
    /// groups.
    pub fn view(&self, limit: u32) -> View<'_, T> {
        View::new(self, self.full_range(), limit)
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (TokenIdx, &T, TextRange)> {
        self.tokens
            .iter()
            .zip(&self.ranges)
            .enumerate()
            .map(|(i, (token, range))| (TokenIdx::from(i), token, *range))
    }
}

impl<T> Index<TokenIdx> for TokenSequence<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, idx: TokenIdx) -> &Self::Output {
        &self.tokens[idx.index()]
    }
}
