use std::{cmp::Ordering, collections::BinaryHeap};

use tracing::trace;

use super::{LeafSymbol, Node, NodeId, PrefixTree};
use crate::frequency::FrequencyTable;

/// Tie key of the placeholder leaf; one past the largest byte value.
const PLACEHOLDER_KEY: u16 = 256;

/// A root in the working set, ordered so that [`BinaryHeap`] pops the
/// lightest one first.
///
/// Equal weights are broken by the smallest tie key in the subtree. Subtrees in
/// the working set are disjoint and leaf keys are unique, so no two entries
/// ever compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    tie_key: u16,
    id: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        (other.weight, other.tie_key, other.id.0).cmp(&(self.weight, self.tie_key, self.id.0))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn leaf(&mut self, symbol: LeafSymbol, weight: u64) -> HeapEntry {
        let tie_key = match symbol {
            LeafSymbol::Byte(byte) => byte as u16,
            LeafSymbol::Placeholder => PLACEHOLDER_KEY,
        };
        self.push(Node::Leaf { symbol, weight }, tie_key)
    }

    fn internal(&mut self, left: HeapEntry, right: HeapEntry) -> HeapEntry {
        let weight = left.weight + right.weight;
        let tie_key = left.tie_key.min(right.tie_key);
        let node = Node::Internal {
            weight,
            left: left.id,
            right: right.id,
        };
        self.push(node, tie_key)
    }

    fn push(&mut self, node: Node, tie_key: u16) -> HeapEntry {
        let id = NodeId(self.nodes.len());
        let weight = node.weight();
        self.nodes.push(node);
        HeapEntry {
            weight,
            tie_key,
            id,
        }
    }
}

impl PrefixTree {
    /// Build the optimal prefix tree for `freq` by repeatedly merging the two
    /// lightest roots. The lighter of the pair becomes the left child.
    ///
    /// Returns `None` if no symbol has a non-zero count.
    pub fn build(freq: &FrequencyTable) -> Option<Self> {
        let mut arena = Arena::default();
        let mut heap: BinaryHeap<HeapEntry> = freq
            .present()
            .map(|(symbol, count)| arena.leaf(LeafSymbol::Byte(symbol), count))
            .collect();

        match heap.len() {
            0 => return None,
            1 => {
                let placeholder = arena.leaf(LeafSymbol::Placeholder, 0);
                heap.push(placeholder);
            }
            _ => (),
        }

        loop {
            let left = heap.pop()?;
            let Some(right) = heap.pop() else {
                return Some(Self {
                    nodes: arena.nodes,
                    root: left.id,
                });
            };

            trace!(
                left_weight = left.weight,
                left_key = left.tie_key,
                right_weight = right.weight,
                right_key = right.tie_key,
                "merging lightest roots"
            );
            heap.push(arena.internal(left, right));
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn build(input: &[u8]) -> PrefixTree {
        PrefixTree::build(&FrequencyTable::from_symbols(input)).unwrap()
    }

    /// Symbols of the leaves in left-to-right order.
    fn leaves(tree: &PrefixTree) -> Vec<LeafSymbol> {
        let mut out = vec![];
        let mut stack = vec![tree.root()];
        while let Some(id) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => out.push(symbol),
                Node::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    #[test]
    fn empty_table_has_no_tree() {
        assert_eq!(PrefixTree::build(&FrequencyTable::from_symbols(b"")), None);
    }

    #[test]
    fn single_symbol_gets_placeholder_sibling() {
        let tree = build(b"aaaa");
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(
            leaves(&tree),
            [LeafSymbol::Placeholder, LeafSymbol::Byte(b'a')]
        );
    }

    #[test]
    fn abracadabra_shape() {
        // c,d merge first; then b with (c,d) since b sorts before c; then r.
        let tree = build(b"abracadabra");
        let expected = [b'a', b'r', b'b', b'c', b'd'].map(LeafSymbol::Byte);
        assert_eq!(leaves(&tree), expected);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn internal_weights_are_sums() {
        let tree = build(b"the quick brown fox jumps over the lazy dog");
        for node in &tree.nodes {
            if let Node::Internal { weight, left, right } = *node {
                assert_eq!(weight, tree.node(left).weight() + tree.node(right).weight());
            }
        }
    }

    #[test_case(b"ab"; "two symbols")]
    #[test_case(b"aabbccdd"; "uniform")]
    #[test_case(b"mississippi"; "ties between leaves and internal nodes")]
    fn deterministic(input: &[u8]) {
        assert_eq!(build(input), build(input));
    }

    #[test]
    fn equal_weights_break_on_smallest_symbol() {
        // All weights equal: pairs merge in symbol order, lower key on the left.
        let tree = build(b"dcba");
        let expected = [b'a', b'b', b'c', b'd'].map(LeafSymbol::Byte);
        assert_eq!(leaves(&tree), expected);
    }

    #[test]
    fn fibonacci_weights_give_a_deep_tree() {
        let mut input = vec![];
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in 0..12u8 {
            input.extend(std::iter::repeat(symbol).take(a));
            (a, b) = (b, a + b);
        }
        assert_eq!(build(&input).depth(), 11);
    }
}
