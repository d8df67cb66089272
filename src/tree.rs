mod builder;

use std::fmt;

/// Index of a node within its [`PrefixTree`].
///
/// Only meaningful for the tree that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a leaf stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafSymbol {
    Byte(u8),

    /// Zero-weight filler that gives a single-symbol input a second leaf, so
    /// the real symbol's code is never empty. It never occurs in an encoding.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: LeafSymbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// An immutable binary prefix tree, stored as an arena of nodes.
///
/// Descending left is bit `0`, descending right is bit `1`. Every internal
/// node has exactly two children, and a tree always has at least two leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl PrefixTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The child reached from `id` by following `bit`, or `None` if `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match *self.node(id) {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    /// Total weight, i.e. the length of the input the tree was built from.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            match *self.node(id) {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match *self.node(id) {
            Node::Leaf {
                symbol: LeafSymbol::Byte(byte),
                weight,
            } => writeln!(
                f,
                "{indent}{label}Leaf {:?} ({byte:#04x}) [weight: {weight}]",
                byte as char
            ),
            Node::Leaf {
                symbol: LeafSymbol::Placeholder,
                weight,
            } => writeln!(f, "{indent}{label}Placeholder [weight: {weight}]"),
            Node::Internal {
                weight,
                left,
                right,
            } => {
                writeln!(f, "{indent}{label}Internal [weight: {weight}]")?;
                self.fmt_node(f, left, depth + 1, "0: ")?;
                self.fmt_node(f, right, depth + 1, "1: ")
            }
        }
    }
}

impl fmt::Display for PrefixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, 0, "")
    }
}
