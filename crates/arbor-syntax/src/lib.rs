//! Token sequences, views over them, and the trees built from them.
//!
//! Tokens are owned by a [`TokenSequence`] and addressed by a stable
//! [`TokenIdx`]. Trees never own tokens; every node stores the index of the
//! token it was built from, so a tree is only meaningful next to the sequence
//! it was parsed from.

/// Reusable next-token and splitting rules for common token shapes.
pub mod shape;
mod token;
mod tree;
mod view;

pub use shape::{Family, Shape, Shaped};
pub use token::{Token, TokenIdx, TokenRange, TokenSequence};
pub use tree::{Node, NodeData, Preorder, Tree};
pub use view::View;
