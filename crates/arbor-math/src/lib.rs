//! Arithmetic expressions: numbers, `pi` and `e`, single-letter variables,
//! `+ - * / ^`, unary minus, parentheses, `|x|` and a set of named functions.

mod eval;
mod recognize;
mod token;

use arbor_parse::{Config, Parsed};

pub use eval::{Binding, BindingError, Environment, EvalError, evaluate};
pub use recognize::recognizers;
pub use token::{BinaryOp, Constant, Function, MathToken};

pub type Engine = arbor_parse::Engine<MathToken>;

pub fn engine(config: Config) -> arbor_errors::Result<Engine> {
    Ok(Engine::with_config(recognizers()?, config))
}

/// Tokenizes, parses and evaluates `text` in one go.
pub fn evaluate_str(engine: &Engine, text: &str, env: &Environment) -> Result<f64, EvalError> {
    let Parsed { tokens, tree } = engine.process(text)?;
    evaluate(&tokens, &tree, env)
}
