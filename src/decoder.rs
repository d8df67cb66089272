use bitvec::{order::Msb0, slice::BitSlice};

use crate::{
    tree::{LeafSymbol, Node, NodeId, PrefixTree},
    CodecError, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between codes. Input may end here.
    AtRoot,

    /// Partway down the tree, at an internal node.
    Descending(NodeId),
}

/// Walks a [`PrefixTree`] one bit at a time.
///
/// Implements iterator, producing one decoded symbol per complete code. After
/// an error, yields nothing more.
pub struct Decoder<'t, B> {
    tree: &'t PrefixTree,
    bits: B,
    state: State,

    /// Bits consumed so far.
    position: usize,

    failed: bool,
}

impl<'t, B> Decoder<'t, B>
where
    B: Iterator<Item = Result<bool>>,
{
    pub fn new(tree: &'t PrefixTree, bits: B) -> Self {
        Self {
            tree,
            bits,
            state: State::AtRoot,
            position: 0,
            failed: false,
        }
    }

    /// Helper function for `Iterator::next`. The same logic, but slightly
    /// different types.
    ///
    /// Return `Ok(None)` once the bits run out on a code boundary.
    pub fn next_symbol(&mut self) -> Result<Option<u8>> {
        loop {
            let bit = match self.bits.next() {
                Some(bit) => bit?,
                None => {
                    return match self.state {
                        State::AtRoot => Ok(None),
                        State::Descending(_) => Err(CodecError::TruncatedCode {
                            bits: self.position,
                        }),
                    }
                }
            };

            let from = match self.state {
                State::AtRoot => self.tree.root(),
                State::Descending(id) => id,
            };
            let Some(to) = self.tree.child(from, bit) else {
                unreachable!("decoder positioned on a leaf");
            };
            self.position += 1;

            match *self.tree.node(to) {
                Node::Leaf {
                    symbol: LeafSymbol::Byte(byte),
                    ..
                } => {
                    self.state = State::AtRoot;
                    return Ok(Some(byte));
                }
                Node::Leaf {
                    symbol: LeafSymbol::Placeholder,
                    ..
                } => {
                    return Err(CodecError::PlaceholderReached {
                        position: self.position,
                    })
                }
                Node::Internal { .. } => self.state = State::Descending(to),
            }
        }
    }
}

impl<'t, B> Iterator for Decoder<'t, B>
where
    B: Iterator<Item = Result<bool>>,
{
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_symbol();
        self.failed = result.is_err();
        result.transpose()
    }
}

/// Read a string of `'0'` and `'1'` as bits.
pub fn spelled_bits(bits: &str) -> impl Iterator<Item = Result<bool>> + '_ {
    bits.chars()
        .enumerate()
        .map(|(position, bit)| match bit {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(CodecError::InvalidBit { bit, position }),
        })
}

/// Decode a string of `'0'` and `'1'`. All or nothing: on error no symbols are returned.
pub fn decode(bits: &str, tree: &PrefixTree) -> Result<Vec<u8>> {
    Decoder::new(tree, spelled_bits(bits)).collect()
}

/// Decode packed bits.
pub fn decode_bits(bits: &BitSlice<u8, Msb0>, tree: &PrefixTree) -> Result<Vec<u8>> {
    Decoder::new(tree, bits.iter().by_vals().map(Ok)).collect()
}
