//! Lossless compression with optimal prefix (Huffman) codes over bytes.
//!
//! ```
//! let encoded = huffman::compress(b"abracadabra");
//! assert!(encoded.bit_len() < huffman::fixed_width_bits(11));
//! assert_eq!(huffman::decompress(&encoded)?, b"abracadabra");
//! # Ok::<(), huffman::CodecError>(())
//! ```

mod bufread;
pub mod code_table;
pub mod decoder;
mod encoded;
pub mod encoder;
mod errors;
pub mod frequency;
pub mod tree;

use std::io::BufRead;

use tracing::debug;

use crate::bufread::{BufReadAdapter, Chunks};
use crate::code_table::CodeTable;
use crate::decoder::Decoder;
use crate::frequency::FrequencyTable;
use crate::tree::PrefixTree;

pub use crate::bufread::OUT_CHUNK_SIZE;
pub use crate::encoded::{EncodedResult, PackedBits, PackedResult};
pub use crate::errors::{CodecError, Result};

/// Frequency table, tree and code table for one input.
fn analyze(input: &[u8]) -> Option<(PrefixTree, CodeTable)> {
    let freq = FrequencyTable::from_symbols(input);
    let tree = PrefixTree::build(&freq)?;
    let table = CodeTable::from_tree(&tree);
    debug!(
        input_len = input.len(),
        distinct = freq.distinct(),
        depth = tree.depth(),
        encoded_bits = table.encoded_len(&freq),
        "built prefix code"
    );
    Some((tree, table))
}

/// Encode `input` with a prefix code built from its own symbol frequencies.
///
/// An empty input yields empty bits and no tree.
pub fn compress(input: &[u8]) -> EncodedResult {
    let Some((tree, table)) = analyze(input) else {
        return EncodedResult::new(String::new(), None);
    };
    match encoder::encode(input, &table) {
        Ok(bits) => EncodedResult::new(bits, Some(tree)),
        Err(e) => unreachable!("code table is missing a symbol of its own input: {e}"),
    }
}

/// Like [`compress`], but with the bits packed into bytes.
pub fn compress_packed(input: &[u8]) -> PackedResult {
    let Some((tree, table)) = analyze(input) else {
        return PackedResult::new(PackedBits::from_bitvec(Default::default()), None);
    };
    match encoder::encode_bits(input, &table) {
        Ok(bits) => PackedResult::new(PackedBits::from_bitvec(bits), Some(tree)),
        Err(e) => unreachable!("code table is missing a symbol of its own input: {e}"),
    }
}

/// Reconstruct the input of [`compress`].
///
/// Either every symbol is decoded or an error is returned; there is no partial
/// output.
pub fn decompress(result: &EncodedResult) -> Result<Vec<u8>> {
    let decoded = match result.tree() {
        Some(tree) => decoder::decode(result.bits(), tree)?,
        None if result.bits().is_empty() => vec![],
        None => {
            return Err(CodecError::MissingTree {
                bits: result.bit_len(),
            })
        }
    };
    debug!(
        bits = result.bit_len(),
        output_len = decoded.len(),
        "decompressed"
    );
    Ok(decoded)
}

/// Decode `result` as a reader, in chunks of [`OUT_CHUNK_SIZE`] bytes.
///
/// Decoding errors surface as [`std::io::ErrorKind::InvalidData`] from the
/// read that hits them; chunks read before that are already delivered.
pub fn decode_reader(result: &EncodedResult) -> impl BufRead + '_ {
    let symbols: Box<dyn Iterator<Item = Result<u8>> + '_> = match result.tree() {
        Some(tree) => Box::new(Decoder::new(tree, decoder::spelled_bits(result.bits()))),
        None if result.bits().is_empty() => Box::new(std::iter::empty()),
        None => Box::new(std::iter::once(Err(CodecError::MissingTree {
            bits: result.bit_len(),
        }))),
    };
    BufReadAdapter::new(Chunks::new(symbols))
}

/// Bits taken by `len` symbols at a fixed eight bits each.
pub fn fixed_width_bits(len: usize) -> usize {
    len * 8
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(b"Hello world!")]
    #[test_case(b"abc")]
    #[test_case(b"A")]
    #[test_case(b"")]
    #[test_case(&[0, 0, 255, 1, 0])]
    fn round_trip(input: &[u8]) {
        let encoded = compress(input);
        assert_eq!(decompress(&encoded).unwrap(), input);
    }

    #[test]
    fn abracadabra() {
        let encoded = compress(b"abracadabra");
        assert_eq!(encoded.bits(), "01101001110011110110100");
        assert!(encoded.bit_len() < fixed_width_bits(11));
        assert_eq!(decompress(&encoded).unwrap(), b"abracadabra");
    }

    #[test]
    fn skewed_input_beats_fixed_width() {
        let encoded = compress(b"aaaaaaaab");
        assert_eq!(encoded.bit_len(), 9);
        assert!(encoded.bit_len() < 72);
    }

    #[test]
    fn single_symbol() {
        let encoded = compress(b"aaaa");
        let tree = encoded.tree().unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(encoded.bits(), "1111");
        assert_eq!(decompress(&encoded).unwrap(), b"aaaa");
    }

    #[test]
    fn deterministic() {
        let input = b"it was the best of times, it was the worst of times";
        assert_eq!(compress(input), compress(input));
    }

    #[test]
    fn empty_input() {
        let encoded = compress(b"");
        assert_eq!(encoded.bits(), "");
        assert!(encoded.tree().is_none());
        assert_eq!(decompress(&encoded), Ok(vec![]));
    }

    #[test]
    fn bits_without_tree() {
        let encoded = EncodedResult::new("0101".into(), None);
        assert_eq!(
            decompress(&encoded),
            Err(CodecError::MissingTree { bits: 4 })
        );
    }

    #[test]
    fn invalid_bit_gives_no_partial_result() {
        let tree = compress(b"abracadabra").into_parts().1;
        let encoded = EncodedResult::new("01x0".into(), tree);
        assert_eq!(
            decompress(&encoded),
            Err(CodecError::InvalidBit {
                bit: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn tree_from_another_input() {
        // Decoding with a different tree is a caller error; it must not panic.
        let foreign = compress(b"zzzzzzzzy").into_parts().1;
        let encoded = EncodedResult::new(compress(b"abracadabra").bits().into(), foreign);
        assert!(decompress(&encoded).is_ok_and(|decoded| decoded != b"abracadabra"));
    }
}
