use arbor_errors::{Error, Result};
use arbor_tokenizer::{Cursor, Recognizers, whitespace};

use crate::token::{BinaryOp, Constant, Function, MathToken};

/// Recognizers for arithmetic expressions. Function names carry their opening
/// parenthesis, so they are tried before constants and variables that share a
/// first letter.
pub fn recognizers() -> Result<Recognizers<MathToken>> {
    let mut recognizers = Recognizers::new(vec![whitespace()])?;

    recognizers.push(|cursor| cursor.eat_char('(').then_some(MathToken::Open));
    recognizers.push(|cursor| cursor.eat_char(')').then_some(MathToken::Close));
    recognizers.push(|cursor| cursor.eat_char('|').then_some(MathToken::Abs));

    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow] {
        recognizers.push(move |cursor| cursor.eat_char(op.symbol()).then_some(MathToken::Binary(op)));
    }

    for function in Function::ALL {
        recognizers.push(move |cursor| {
            cursor.eat_any_str(function.spellings()).then_some(MathToken::Function(function))
        });
    }

    recognizers.try_push(number);
    recognizers.push(|cursor| cursor.eat_str("pi").then_some(MathToken::Constant(Constant::Pi)));
    recognizers.push(|cursor| cursor.eat_char('e').then_some(MathToken::Constant(Constant::E)));
    recognizers.push(variable);
    recognizers.push(|cursor| {
        (cursor.eat_char(',') || cursor.eat_char(';')).then_some(MathToken::Separator)
    });

    Ok(recognizers)
}

/// A run of digits and decimal points such as `12`, `0.5`, `.5` or `3.`.
/// A second point, or a point with no digits, is malformed.
fn number(cursor: &mut Cursor<'_>) -> Result<Option<MathToken>> {
    let start = cursor.pos();
    let mut seen_point = false;

    while cursor.peek().is_ascii_digit() || cursor.peek() == '.' {
        if cursor.peek() == '.' {
            if seen_point {
                return Err(Error::IncorrectlyFormedNumber { offset: cursor.pos() });
            }
            seen_point = true;
        }
        cursor.advance();
    }

    let text = cursor.text_since(start);
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse() {
        Ok(value) => Ok(Some(MathToken::Number(value))),
        Err(_) => Err(Error::IncorrectlyFormedNumber { offset: start }),
    }
}

fn variable(cursor: &mut Cursor<'_>) -> Option<MathToken> {
    let name = cursor.peek();
    if name.is_ascii_lowercase() {
        cursor.advance();
        Some(MathToken::Variable(name))
    } else {
        None
    }
}
