use arbor_errors::{Error, Result};

use crate::{Token, TokenIdx, TokenRange, View};

/// Groups delimiters that may close each other. An `Open(f)` or `Call(f)` is
/// closed by `Close(f)`, a `Bar(f)` by the next `Bar(f)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Family(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Terminal: numbers, constants, variables.
    Leaf,
    /// Owns the rest of the range to its right.
    Prefix,
    /// Owns the ranges on both sides.
    Binary,
    Open(Family),
    Close(Family),
    /// A delimiter that both opens and closes, like `|x|`.
    Bar(Family),
    /// An opening delimiter whose group is an argument list.
    Call(Family),
    /// Separates arguments of a `Call`. Never the root of a subtree.
    Separator,
}

/// Tokens that describe themselves with a [`Shape`] and can therefore use the
/// helpers of this module to implement [`Token`].
pub trait Shaped: Token {
    fn shape(&self) -> Shape;
}

pub fn next_token<T: Shaped>(view: View<'_, T>, at: TokenIdx) -> Result<TokenIdx> {
    match view.token(at).shape() {
        Shape::Open(_) | Shape::Call(_) | Shape::Bar(_) => Ok(find_matching(view, at)?.next()),
        Shape::Close(_) => Err(no_matching(view, at)),
        Shape::Leaf | Shape::Prefix | Shape::Binary | Shape::Separator => Ok(at.next()),
    }
}

pub fn split<T: Shaped>(view: View<'_, T>, at: TokenIdx, out: &mut Vec<TokenRange>) -> Result<()> {
    match view.token(at).shape() {
        Shape::Leaf => {}
        Shape::Prefix => out.push(TokenRange::new(at.next(), view.end())),
        Shape::Binary => {
            out.push(TokenRange::new(view.start(), at));
            out.push(TokenRange::new(at.next(), view.end()));
        }
        Shape::Open(_) | Shape::Bar(_) => {
            let close = find_matching(view, at)?;
            out.push(TokenRange::new(at.next(), close));
        }
        Shape::Call(_) => {
            let close = find_matching(view, at)?;
            split_arguments(view.narrow(TokenRange::new(at.next(), close)), out)?;
        }
        Shape::Close(_) => return Err(no_matching(view, at)),
        Shape::Separator => return Err(Error::WrongTokenType { range: view.text_range(at) }),
    }
    Ok(())
}

/// Position of the delimiter that closes the group opened at `at`.
///
/// Tokens between the two are stepped over with their own
/// [`Token::next_token`], so nested groups are skipped whole and only a
/// partner at the same nesting level can match.
pub fn find_matching<T: Shaped>(view: View<'_, T>, at: TokenIdx) -> Result<TokenIdx> {
    let partner = match view.token(at).shape() {
        Shape::Open(family) | Shape::Call(family) => Shape::Close(family),
        Shape::Bar(family) => Shape::Bar(family),
        _ => return Err(Error::WrongTokenType { range: view.text_range(at) }),
    };

    let nested = view.descend()?;
    let mut cursor = at.next();
    while cursor < view.end() {
        let token = view.token(cursor);
        if token.shape() == partner {
            return Ok(cursor);
        }
        cursor = token.next_token(nested, cursor)?;
    }

    Err(no_matching(view, at))
}

/// Splits an argument list at separators that are not inside a nested group.
/// An argument list without separators stays a single range.
pub fn split_arguments<T: Shaped>(args: View<'_, T>, out: &mut Vec<TokenRange>) -> Result<()> {
    let mut segment = args.start();
    let mut cursor = args.start();
    while cursor < args.end() {
        let token = args.token(cursor);
        if token.shape() == Shape::Separator {
            out.push(TokenRange::new(segment, cursor));
            segment = cursor.next();
        }
        cursor = token.next_token(args, cursor)?;
    }
    out.push(TokenRange::new(segment, args.end()));
    Ok(())
}

fn no_matching<T>(view: View<'_, T>, at: TokenIdx) -> Error {
    Error::NoMatchingToken { range: view.text_range(at) }
}
