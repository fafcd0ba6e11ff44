use std::num::ParseFloatError;
use std::str::FromStr;

use arbor_errors::{Diagnostic, Error, TextRange};
use arbor_syntax::{Node, TokenSequence, Tree};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::token::{BinaryOp, Function, MathToken};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero { range: TextRange },
    #[error("root of a negative number")]
    NegativeRoot { range: TextRange },
    #[error("unresolved symbol `{name}`")]
    UnresolvedSymbol { name: char, range: TextRange },
    #[error(transparent)]
    Core(#[from] Error),
}

impl EvalError {
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::DivisionByZero { range }
            | Self::NegativeRoot { range }
            | Self::UnresolvedSymbol { range, .. } => Some(*range),
            Self::Core(error) => error.range(),
        }
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(error: &EvalError) -> Self {
        Self::error(error.to_string(), error.range())
    }
}

/// Values of the variables an expression may refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: FxHashMap<char, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value, if any.
    pub fn set(&mut self, name: char, value: f64) -> Option<f64> {
        self.values.insert(name, value)
    }

    pub fn get(&self, name: char) -> Option<f64> {
        self.values.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(char, f64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (char, f64)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl Extend<Binding> for Environment {
    fn extend<I: IntoIterator<Item = Binding>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(|binding| (binding.name, binding.value)));
    }
}

/// A `name=value` assignment, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub name: char,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("expected `name=value`")]
    MissingEquals,
    #[error("`{0}` is not a variable name; use a single lowercase letter other than `e`")]
    InvalidName(String),
    #[error("invalid value `{0}`")]
    InvalidValue(String, #[source] ParseFloatError),
}

impl FromStr for Binding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s.split_once('=').ok_or(BindingError::MissingEquals)?;
        let (name, value) = (name.trim(), value.trim());

        let mut chars = name.chars();
        let name = match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_lowercase() && ch != 'e' => ch,
            _ => return Err(BindingError::InvalidName(name.to_owned())),
        };
        let value = value
            .parse()
            .map_err(|error| BindingError::InvalidValue(value.to_owned(), error))?;

        Ok(Self { name, value })
    }
}

/// Computes the value of `tree`, which must have been built over `tokens`.
/// An empty tree is [`Error::EmptyExpression`].
pub fn evaluate(
    tokens: &TokenSequence<MathToken>,
    tree: &Tree,
    env: &Environment,
) -> Result<f64, EvalError> {
    let root = tree.root().ok_or(Error::EmptyExpression)?;
    let value = Evaluator { tokens, tree, env }.eval(root)?;
    debug!(nodes = tree.len(), value, "evaluated");
    Ok(value)
}

struct Evaluator<'a> {
    tokens: &'a TokenSequence<MathToken>,
    tree: &'a Tree,
    env: &'a Environment,
}

impl Evaluator<'_> {
    fn eval(&self, node: Node) -> Result<f64, EvalError> {
        let at = self.tree.token(node);
        let range = self.tokens.text_range(at);
        let children = self.tree.children(node);

        match self.tokens[at] {
            MathToken::Number(value) => Ok(value),
            MathToken::Constant(constant) => Ok(constant.value()),
            MathToken::Variable(name) => {
                self.env.get(name).ok_or(EvalError::UnresolvedSymbol { name, range })
            }
            MathToken::Binary(op) => {
                let [lhs, rhs] = self.args::<2>(children, range)?;
                binary(op, lhs, rhs, range)
            }
            MathToken::Negate => self.args::<1>(children, range).map(|[x]| -x),
            MathToken::Open => self.args::<1>(children, range).map(|[x]| x),
            MathToken::Abs => self.args::<1>(children, range).map(|[x]| x.abs()),
            MathToken::Function(function) => self.call(function, children, range),
            MathToken::Close | MathToken::Separator => Err(Error::WrongTokenType { range }.into()),
        }
    }

    fn call(&self, function: Function, children: &[Node], range: TextRange) -> Result<f64, EvalError> {
        let unary = |f: fn(f64) -> f64| self.args::<1>(children, range).map(|[x]| f(x));

        match function {
            Function::Log => self.args::<2>(children, range).map(|[x, base]| x.ln() / base.ln()),
            Function::Sqrt => {
                let [x] = self.args::<1>(children, range)?;
                if x < 0.0 {
                    return Err(EvalError::NegativeRoot { range });
                }
                Ok(x.sqrt())
            }
            Function::Ln => unary(f64::ln),
            Function::Log2 => unary(f64::log2),
            Function::Log10 => unary(f64::log10),
            Function::Exp => unary(f64::exp),
            Function::Sign => unary(|x| if x == 0.0 { 0.0 } else { x.signum() }),
            Function::Sin => unary(f64::sin),
            Function::Cos => unary(f64::cos),
            Function::Tan => unary(f64::tan),
            Function::Cot => unary(|x| x.tan().recip()),
            Function::Asin => unary(f64::asin),
            Function::Acos => unary(f64::acos),
            Function::Atan => unary(f64::atan),
            Function::Sinh => unary(f64::sinh),
            Function::Cosh => unary(f64::cosh),
            Function::Tanh => unary(f64::tanh),
            Function::Asinh => unary(f64::asinh),
            Function::Acosh => unary(f64::acosh),
            Function::Atanh => unary(f64::atanh),
        }
    }

    fn args<const N: usize>(&self, children: &[Node], range: TextRange) -> Result<[f64; N], EvalError> {
        if children.len() != N {
            let got = children.len();
            return Err(Error::UnexpectedSubexpressionCount { got, expected: N, range }.into());
        }

        let mut values = [0.0; N];
        for (value, &child) in values.iter_mut().zip(children) {
            *value = self.eval(child)?;
        }
        Ok(values)
    }
}

fn binary(op: BinaryOp, lhs: f64, rhs: f64, range: TextRange) -> Result<f64, EvalError> {
    Ok(match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div if rhs == 0.0 => return Err(EvalError::DivisionByZero { range }),
        BinaryOp::Div => lhs / rhs,
        // Even roots of negatives have no real value; integer powers are fine.
        BinaryOp::Pow if lhs < 0.0 && rhs.fract() != 0.0 => {
            return Err(EvalError::NegativeRoot { range });
        }
        BinaryOp::Pow => lhs.powf(rhs),
    })
}
