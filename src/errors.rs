use std::io;

/// An error encountered while encoding or decoding.
///
/// Only [`InvalidBit`] can be caused by well-formed use of the public API with
/// untrusted input. The other variants mean an encoding was paired with a code
/// table or tree it wasn't produced from.
///
/// [`InvalidBit`]: CodecError::InvalidBit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid bit {bit:?} at position {position}; expected '0' or '1'")]
    InvalidBit { bit: char, position: usize },

    #[error("symbol {0:#04x} has no code in this code table")]
    MissingCode(u8),

    /// The bits ran out partway down the tree.
    #[error("encoding ends in the middle of a code after {bits} bits")]
    TruncatedCode { bits: usize },

    #[error("code ending at bit {position} leads to the placeholder leaf")]
    PlaceholderReached { position: usize },

    #[error("{bits} encoded bits but no tree to decode them with")]
    MissingTree { bits: usize },

    #[error("bit length {bit_len} exceeds packed capacity of {capacity} bits")]
    PackedLength { bit_len: usize, capacity: usize },
}

impl From<CodecError> for io::Error {
    fn from(e: CodecError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
