use std::fmt;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::{
    frequency::{FrequencyTable, ALPHABET_SIZE},
    tree::{LeafSymbol, Node, PrefixTree},
};

/// The path from the root to a leaf: `0` for left, `1` for right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(BitVec<u8, Msb0>);

impl Code {
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.len() >= self.len() && other.0[..self.len()] == self.0[..]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, derived from a [`PrefixTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Record the path to every symbol leaf. The placeholder leaf gets no code.
    pub fn from_tree(tree: &PrefixTree) -> Self {
        debug_assert!(
            matches!(tree.node(tree.root()), Node::Internal { .. }),
            "prefix tree with a lone leaf"
        );

        let mut codes = vec![None; ALPHABET_SIZE];
        let mut stack = vec![(tree.root(), BitVec::<u8, Msb0>::new())];
        while let Some((id, path)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf {
                    symbol: LeafSymbol::Byte(byte),
                    ..
                } => codes[byte as usize] = Some(Code(path)),
                Node::Leaf {
                    symbol: LeafSymbol::Placeholder,
                    ..
                } => (),
                Node::Internal { left, right, .. } => {
                    let mut left_path = path.clone();
                    left_path.push(false);
                    let mut right_path = path;
                    right_path.push(true);
                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn code(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Symbols with a code, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        (0..=u8::MAX)
            .filter_map(move |symbol| self.code(symbol).map(|code| (symbol, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bits needed to encode an input with these frequencies.
    ///
    /// Symbols without a code are ignored.
    pub fn encoded_len(&self, freq: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| freq.get(symbol) * code.len() as u64)
            .sum()
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
