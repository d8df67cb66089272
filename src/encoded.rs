use std::fmt;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView};

use crate::{decoder, tree::PrefixTree, CodecError, Result};

/// An encoding spelled out as `'0'`/`'1'` characters, bundled with the tree
/// needed to decode it.
///
/// `tree` is `None` only for the encoding of an empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    bits: String,
    tree: Option<PrefixTree>,
}

impl EncodedResult {
    pub fn new(bits: String, tree: Option<PrefixTree>) -> Self {
        Self { bits, tree }
    }

    pub fn bits(&self) -> &str {
        &self.bits
    }

    pub fn tree(&self) -> Option<&PrefixTree> {
        self.tree.as_ref()
    }

    pub fn into_parts(self) -> (String, Option<PrefixTree>) {
        (self.bits, self.tree)
    }

    /// Length of the encoding in bits.
    pub fn bit_len(&self) -> usize {
        self.bits.chars().count()
    }

    /// Pack the bits eight to a byte.
    ///
    /// Fails if the bit string contains anything other than `'0'` and `'1'`.
    pub fn pack(&self) -> Result<PackedResult> {
        let bits: BitVec<u8, Msb0> = decoder::spelled_bits(&self.bits).collect::<Result<_>>()?;
        Ok(PackedResult {
            bits: PackedBits::from_bitvec(bits),
            tree: self.tree.clone(),
        })
    }
}

/// Bits packed MSB-first into bytes.
///
/// The final byte is zero-padded; `bit_len` says where the real bits end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl PackedBits {
    pub fn from_bitvec(mut bits: BitVec<u8, Msb0>) -> Self {
        let bit_len = bits.len();
        bits.set_uninitialized(false);
        Self {
            bytes: bits.into_vec(),
            bit_len,
        }
    }

    /// Reassemble from stored parts. Padding bits past `bit_len` are ignored.
    pub fn from_raw(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        let capacity = bytes.len() * 8;
        if bit_len > capacity {
            return Err(CodecError::PackedLength { bit_len, capacity });
        }
        Ok(Self { bytes, bit_len })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bytes.view_bits::<Msb0>()[..self.bit_len]
    }

    pub fn to_spelled(&self) -> String {
        self.as_bitslice()
            .iter()
            .by_vals()
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for PackedBits {
    /// Hex bytes followed by the bit length.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bits)", hex::encode(&self.bytes), self.bit_len)
    }
}

/// The packed counterpart of [`EncodedResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedResult {
    bits: PackedBits,
    tree: Option<PrefixTree>,
}

impl PackedResult {
    pub fn new(bits: PackedBits, tree: Option<PrefixTree>) -> Self {
        Self { bits, tree }
    }

    pub fn bits(&self) -> &PackedBits {
        &self.bits
    }

    pub fn tree(&self) -> Option<&PrefixTree> {
        self.tree.as_ref()
    }

    pub fn unpack(&self) -> EncodedResult {
        EncodedResult::new(self.bits.to_spelled(), self.tree.clone())
    }

    pub fn decompress(&self) -> Result<Vec<u8>> {
        let bits = self.bits.as_bitslice();
        match &self.tree {
            Some(tree) => decoder::decode_bits(bits, tree),
            None if bits.is_empty() => Ok(vec![]),
            None => Err(CodecError::MissingTree { bits: bits.len() }),
        }
    }
}
