use std::fmt;

use arbor_errors::{Error, Result};
use arbor_syntax::shape::{self, Family, Shape, Shaped};
use arbor_syntax::{Token, TokenIdx, TokenRange, View};

const PAREN: Family = Family(0);
const ABS: Family = Family(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathToken {
    Number(f64),
    Constant(Constant),
    /// A single lowercase ASCII letter.
    Variable(char),
    Binary(BinaryOp),
    /// Unary minus. Produced only by backpatching a `-`.
    Negate,
    Open,
    Close,
    Abs,
    Function(Function),
    Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Ln,
    Log2,
    Log10,
    /// `log(x, base)`.
    Log,
    Exp,
    Sqrt,
    Sign,
    Sin,
    Cos,
    Tan,
    Cot,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
}

impl Function {
    /// In recognition order.
    pub const ALL: [Self; 20] = [
        Self::Ln,
        Self::Log2,
        Self::Log10,
        Self::Log,
        Self::Exp,
        Self::Sqrt,
        Self::Sign,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Cot,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Asinh,
        Self::Acosh,
        Self::Atanh,
    ];

    /// Spellings including the opening parenthesis. The first one is used
    /// when printing.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            Self::Ln => &["ln("],
            Self::Log2 => &["log2("],
            Self::Log10 => &["log10("],
            Self::Log => &["log("],
            Self::Exp => &["exp("],
            Self::Sqrt => &["sqrt("],
            Self::Sign => &["sign("],
            Self::Sin => &["sin("],
            Self::Cos => &["cos("],
            Self::Tan => &["tg(", "tan("],
            Self::Cot => &["ctg(", "ctan("],
            Self::Asin => &["asin(", "arcsin("],
            Self::Acos => &["acos(", "arccos("],
            Self::Atan => &["atg(", "atan(", "arctg(", "arctan("],
            Self::Sinh => &["sinh("],
            Self::Cosh => &["cosh("],
            Self::Tanh => &["tgh(", "tanh("],
            Self::Asinh => &["asinh(", "arcsinh("],
            Self::Acosh => &["acosh(", "arccosh("],
            Self::Atanh => &["atgh(", "atanh(", "arctgh(", "arctanh("],
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Self::Log => 2,
            _ => 1,
        }
    }
}

impl MathToken {
    fn priority(self) -> u32 {
        match self {
            Self::Binary(BinaryOp::Add | BinaryOp::Sub) => 10,
            Self::Binary(BinaryOp::Mul | BinaryOp::Div) => 20,
            Self::Binary(BinaryOp::Pow) => 30,
            Self::Negate => 35,
            Self::Function(_) => 40,
            Self::Number(_)
            | Self::Constant(_)
            | Self::Variable(_)
            | Self::Open
            | Self::Close
            | Self::Abs
            | Self::Separator => u32::MAX,
        }
    }
}

impl fmt::Display for MathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Constant(Constant::Pi) => f.write_str("pi"),
            Self::Constant(Constant::E) => f.write_str("e"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Binary(op) => write!(f, "{}", op.symbol()),
            Self::Negate => f.write_str("neg"),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
            Self::Abs => f.write_str("|"),
            Self::Function(function) => f.write_str(function.spellings()[0]),
            Self::Separator => f.write_str(","),
        }
    }
}

impl Token for MathToken {
    fn is_precedent(&self, other: &Self) -> Result<bool> {
        Ok(match (self, other) {
            (Self::Separator, _) => true,
            (_, Self::Separator) => false,
            // Keeping the earlier of two equal tokens as root makes them
            // group to the right.
            (Self::Negate, Self::Negate)
            | (Self::Binary(BinaryOp::Pow), Self::Binary(BinaryOp::Pow)) => true,
            _ => self.priority() > other.priority(),
        })
    }

    fn next_token(&self, view: View<'_, Self>, at: TokenIdx) -> Result<TokenIdx> {
        shape::next_token(view, at)
    }

    /// Leaves, groups and calls must cover their whole range, and a prefix
    /// must start it. Anything left over is a stray token.
    fn split(&self, view: View<'_, Self>, at: TokenIdx, out: &mut Vec<TokenRange>) -> Result<()> {
        match self.shape() {
            Shape::Binary | Shape::Close(_) | Shape::Separator => {}
            Shape::Prefix => ensure_first(view, at)?,
            Shape::Leaf | Shape::Open(_) | Shape::Bar(_) | Shape::Call(_) => {
                ensure_first(view, at)?;
                let end = shape::next_token(view, at)?;
                if end < view.end() {
                    return Err(stray(view, end));
                }
            }
        }
        shape::split(view, at, out)
    }

    /// A `-` is negation when nothing before it can be its left operand.
    fn backpatch(tokens: &mut [Self]) {
        let mut expects_operand = true;
        let mut inside_abs = false;

        for token in tokens {
            if *token == Self::Binary(BinaryOp::Sub) && expects_operand {
                *token = Self::Negate;
            }

            expects_operand = match *token {
                Self::Abs => {
                    inside_abs = !inside_abs;
                    inside_abs
                }
                Self::Binary(_) | Self::Negate | Self::Open | Self::Function(_) | Self::Separator => {
                    true
                }
                Self::Number(_) | Self::Constant(_) | Self::Variable(_) | Self::Close => false,
            };
        }
    }
}

impl Shaped for MathToken {
    fn shape(&self) -> Shape {
        match self {
            Self::Number(_) | Self::Constant(_) | Self::Variable(_) => Shape::Leaf,
            Self::Binary(_) => Shape::Binary,
            Self::Negate => Shape::Prefix,
            Self::Open => Shape::Open(PAREN),
            Self::Close => Shape::Close(PAREN),
            Self::Abs => Shape::Bar(ABS),
            Self::Function(_) => Shape::Call(PAREN),
            Self::Separator => Shape::Separator,
        }
    }
}

fn ensure_first(view: View<'_, MathToken>, at: TokenIdx) -> Result<()> {
    if at == view.start() {
        return Ok(());
    }
    Err(stray(view, view.start()))
}

fn stray(view: View<'_, MathToken>, at: TokenIdx) -> Error {
    Error::WrongTokenType { range: view.text_range(at) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub() -> MathToken {
        MathToken::Binary(BinaryOp::Sub)
    }

    fn backpatched(mut tokens: Vec<MathToken>) -> Vec<MathToken> {
        MathToken::backpatch(&mut tokens);
        tokens
    }

    #[test]
    fn minus_after_operand_stays_binary() {
        let one = MathToken::Number(1.0);
        assert_eq!(backpatched(vec![one, sub(), one]), vec![one, sub(), one]);
        assert_eq!(
            backpatched(vec![MathToken::Open, one, MathToken::Close, sub(), one]),
            vec![MathToken::Open, one, MathToken::Close, sub(), one]
        );
    }

    #[test]
    fn minus_without_left_operand_is_negation() {
        let x = MathToken::Variable('x');
        assert_eq!(backpatched(vec![sub(), x]), vec![MathToken::Negate, x]);
        assert_eq!(backpatched(vec![x, MathToken::Binary(BinaryOp::Mul), sub(), x]), vec![
            x,
            MathToken::Binary(BinaryOp::Mul),
            MathToken::Negate,
            x
        ]);
        assert_eq!(backpatched(vec![sub(), sub(), x]), vec![
            MathToken::Negate,
            MathToken::Negate,
            x
        ]);
        assert_eq!(
            backpatched(vec![MathToken::Function(Function::Log), x, MathToken::Separator, sub(), x]),
            vec![MathToken::Function(Function::Log), x, MathToken::Separator, MathToken::Negate, x]
        );
    }

    #[test]
    fn bars_alternate_between_opening_and_closing() {
        let x = MathToken::Variable('x');
        assert_eq!(
            backpatched(vec![MathToken::Abs, sub(), x, MathToken::Abs, sub(), x]),
            vec![MathToken::Abs, MathToken::Negate, x, MathToken::Abs, sub(), x]
        );
    }

    #[test]
    fn separator_outranks_everything() {
        let sep = MathToken::Separator;
        assert!(sep.is_precedent(&MathToken::Number(1.0)).unwrap());
        assert!(sep.is_precedent(&sep).unwrap());
        assert!(!MathToken::Number(1.0).is_precedent(&sep).unwrap());
    }

    #[test]
    fn display_uses_source_spelling() {
        assert_eq!(MathToken::Function(Function::Atanh).to_string(), "atgh(");
        assert_eq!(MathToken::Constant(Constant::Pi).to_string(), "pi");
        assert_eq!(MathToken::Number(2.5).to_string(), "2.5");
        assert_eq!(MathToken::Binary(BinaryOp::Pow).to_string(), "^");
    }
}
