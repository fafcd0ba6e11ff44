mod builder;

pub use arbor_errors::{Error, Result};
use arbor_syntax::{Token, TokenSequence, Tree};
use arbor_tokenizer::{EmptyInput, Recognizers};
use tracing::debug;

/// Bound on both tree depth and delimiter nesting when none is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub empty_input: EmptyInput,
    /// Deepest tree, and deepest delimiter nesting, a parse may produce.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { empty_input: EmptyInput::Allow, max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Tokens and the tree built over them. Tree nodes refer to positions in
/// `tokens`.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub tokens: TokenSequence<T>,
    pub tree: Tree,
}

/// Tokenizes with a fixed set of recognizers and builds trees from the
/// result.
#[derive(Debug)]
pub struct Engine<T> {
    recognizers: Recognizers<T>,
    config: Config,
}

impl<T: Token> Engine<T> {
    pub fn new(recognizers: Recognizers<T>) -> Self {
        Self::with_config(recognizers, Config::default())
    }

    pub fn with_config(recognizers: Recognizers<T>, config: Config) -> Self {
        Self { recognizers, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn recognizers(&self) -> &Recognizers<T> {
        &self.recognizers
    }

    /// Tokenizes `text` and lets the token type rewrite the sequence before it
    /// is handed to the parser.
    pub fn tokenize(&self, text: &str) -> Result<TokenSequence<T>> {
        let mut tokens = self.recognizers.tokenize(text, self.config.empty_input)?;
        T::backpatch(tokens.tokens_mut());
        Ok(tokens)
    }

    pub fn parse(&self, tokens: &TokenSequence<T>) -> Result<Tree> {
        let mut tree = Tree::new();
        self.parse_into(tokens, &mut tree)?;
        Ok(tree)
    }

    /// Rebuilds `tree` over `tokens`. On error the tree is left empty.
    pub fn parse_into(&self, tokens: &TokenSequence<T>, tree: &mut Tree) -> Result<()> {
        parse_into(tokens, tree, self.config.max_depth)
    }

    pub fn process(&self, text: &str) -> Result<Parsed<T>> {
        let tokens = self.tokenize(text)?;
        let tree = self.parse(&tokens)?;
        Ok(Parsed { tokens, tree })
    }
}

/// Builds a tree over `tokens` with the default depth bound.
pub fn parse<T: Token>(tokens: &TokenSequence<T>) -> Result<Tree> {
    let mut tree = Tree::new();
    parse_into(tokens, &mut tree, DEFAULT_MAX_DEPTH)?;
    Ok(tree)
}

pub fn parse_into<T: Token>(
    tokens: &TokenSequence<T>,
    tree: &mut Tree,
    max_depth: u32,
) -> Result<()> {
    tree.clear();
    if let Err(error) = builder::build(tokens, tree, max_depth) {
        tree.clear();
        return Err(error);
    }
    debug!(tokens = tokens.len(), nodes = tree.len(), "parsed");
    Ok(())
}
