use arbor_errors::{Error, Result};
use arbor_syntax::{Node, Token, TokenIdx, TokenRange, TokenSequence, Tree, View};
use tracing::trace;

struct Pending {
    range: TokenRange,
    parent: Option<Node>,
    depth: u32,
}

/// Builds the tree without recursing: each pending range becomes one node,
/// rooted at its least precedent token, and queues the ranges the token
/// splits it into.
pub(crate) fn build<T: Token>(
    tokens: &TokenSequence<T>,
    tree: &mut Tree,
    max_depth: u32,
) -> Result<()> {
    let full = tokens.view(max_depth);
    let mut pending = vec![Pending { range: full.range(), parent: None, depth: 0 }];
    let mut parts = Vec::new();

    while let Some(Pending { range, parent, depth }) = pending.pop() {
        if range.is_empty() {
            continue;
        }
        if depth >= max_depth {
            return Err(Error::NestingTooDeep { limit: max_depth });
        }

        let view = full.narrow(range);
        let root = least_precedent(view)?;
        let node = tree.append(parent, root);
        trace!(?range, root = root.index(), depth, "subtree");

        parts.clear();
        view.token(root).split(view, root, &mut parts)?;
        // Reversed so that the first part is built first and children keep
        // their order under `node`.
        pending.extend(parts.drain(..).rev().map(|range| Pending {
            range,
            parent: Some(node),
            depth: depth + 1,
        }));
    }

    tree.finish();
    Ok(())
}

/// Scans a non-empty view for the token that roots it. Later tokens win ties.
fn least_precedent<T: Token>(view: View<'_, T>) -> Result<TokenIdx> {
    let mut choice = view.start();
    let mut cursor = view.token(choice).next_token(view, choice)?;

    while cursor < view.end() {
        let token = view.token(cursor);
        if !token.is_precedent(view.token(choice))? {
            choice = cursor;
        }

        let next = token.next_token(view, cursor)?;
        debug_assert!(next > cursor, "next_token must move past {cursor:?}");
        cursor = next;
    }

    Ok(choice)
}
