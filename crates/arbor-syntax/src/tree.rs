use std::fmt::{self, Display};

use la_arena::{Arena, Idx};

use crate::{TokenIdx, TokenSequence};

pub type Node = Idx<NodeData>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub token: TokenIdx,
    pub children: Vec<Node>,
}

/// An ordered tree of token positions.
///
/// Nodes are appended under a parent, or under an unnamed scratch root when
/// no parent is given. [`Tree::finish`] promotes the first child of the
/// scratch root to be the real root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Arena<NodeData>,
    scratch: Vec<Node>,
    root: Option<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes = Arena::new();
        self.scratch.clear();
        self.root = None;
    }

    pub fn root(&self) -> Option<Node> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, node: Node) -> &NodeData {
        &self.nodes[node]
    }

    pub fn token(&self, node: Node) -> TokenIdx {
        self.nodes[node].token
    }

    pub fn children(&self, node: Node) -> &[Node] {
        &self.nodes[node].children
    }

    pub fn append(&mut self, parent: Option<Node>, token: TokenIdx) -> Node {
        let node = self.nodes.alloc(NodeData { token, children: Vec::new() });
        match parent {
            Some(parent) => self.nodes[parent].children.push(node),
            None => self.scratch.push(node),
        }
        node
    }

    pub fn finish(&mut self) {
        self.root = self.scratch.first().copied();
        self.scratch.clear();
    }

    /// Depth-first, parents before children, children in order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { tree: self, stack: self.root.into_iter().collect() }
    }

    pub fn display<'a, T: Display>(&'a self, tokens: &'a TokenSequence<T>) -> impl Display + 'a {
        DisplayTree { tree: self, tokens }
    }
}

pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<Node>,
}

impl Iterator for Preorder<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let node = self.stack.pop()?;
        self.stack.extend(self.tree.children(node).iter().rev());
        Some(node)
    }
}

struct DisplayTree<'a, T> {
    tree: &'a Tree,
    tokens: &'a TokenSequence<T>,
}

impl<T: Display> Display for DisplayTree<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.tree.root() else {
            return writeln!(f, "<empty>");
        };

        let mut stack = vec![(root, 0)];
        while let Some((node, level)) = stack.pop() {
            let token = self.tree.token(node);
            writeln!(
                f,
                "{:indent$}{} @{:?}",
                "",
                self.tokens[token],
                self.tokens.text_range(token),
                indent = level * 2
            )?;
            stack.extend(self.tree.children(node).iter().rev().map(|&child| (child, level + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use text_size::{TextRange, TextSize};

    use super::*;

    fn sequence(text: &str) -> TokenSequence<char> {
        let mut tokens = TokenSequence::new();
        for (i, ch) in text.char_indices() {
            tokens.push(ch, TextRange::at(TextSize::new(i as u32), TextSize::of(ch)));
        }
        tokens
    }

    #[test]
    fn scratch_root_is_promoted() {
        let mut tree = Tree::new();
        assert!(tree.is_empty());

        let plus = tree.append(None, TokenIdx::new(1));
        tree.append(Some(plus), TokenIdx::new(0));
        tree.append(Some(plus), TokenIdx::new(2));
        assert!(tree.is_empty());

        tree.finish();
        assert_eq!(tree.root(), Some(plus));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.children(plus).len(), 2);
    }

    #[test]
    fn finish_without_nodes_leaves_tree_empty() {
        let mut tree = Tree::new();
        tree.finish();
        assert!(tree.is_empty());
        assert_eq!(tree.preorder().count(), 0);
    }

    #[test]
    fn preorder_visits_parents_first() {
        let mut tree = Tree::new();
        let mul = tree.append(None, TokenIdx::new(3));
        let plus = tree.append(Some(mul), TokenIdx::new(1));
        tree.append(Some(plus), TokenIdx::new(0));
        tree.append(Some(plus), TokenIdx::new(2));
        tree.append(Some(mul), TokenIdx::new(4));
        tree.finish();

        let order: Vec<_> = tree.preorder().map(|node| tree.token(node).index()).collect();
        assert_eq!(order, vec![3, 1, 0, 2, 4]);
    }

    #[test]
    fn display_indents_children() {
        let tokens = sequence("a+b*c");
        let mut tree = Tree::new();
        let mul = tree.append(None, TokenIdx::new(3));
        let plus = tree.append(Some(mul), TokenIdx::new(1));
        tree.append(Some(plus), TokenIdx::new(0));
        tree.append(Some(plus), TokenIdx::new(2));
        tree.append(Some(mul), TokenIdx::new(4));
        tree.finish();

        expect![[r#"
            * @3..4
              + @1..2
                a @0..1
                b @2..3
              c @4..5
        "#]]
        .assert_eq(&tree.display(&tokens).to_string());
    }

    #[test]
    fn clear_resets_everything() {
        let mut tree = Tree::new();
        tree.append(None, TokenIdx::new(0));
        tree.finish();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree, Tree::new());
    }
}
