use std::io::{self, prelude::*, Cursor};

use crate::Result;

/// Size of decoded chunks (except possibly the last chunk, which may be
/// smaller).
pub const OUT_CHUNK_SIZE: usize = 32 * 1024;

/// Local alias, just for convenience.
///
/// Either an output chunk or an error.
pub(crate) type Item = io::Result<Vec<u8>>;

/// Groups decoded symbols into chunks of [`OUT_CHUNK_SIZE`] bytes.
pub(crate) struct Chunks<S> {
    symbols: S,
}

impl<S: Iterator<Item = Result<u8>>> Chunks<S> {
    pub fn new(symbols: S) -> Self {
        Self { symbols }
    }
}

impl<S: Iterator<Item = Result<u8>>> Iterator for Chunks<S> {
    type Item = Item;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::with_capacity(OUT_CHUNK_SIZE);
        for symbol in self.symbols.by_ref().take(OUT_CHUNK_SIZE) {
            match symbol {
                Ok(byte) => chunk.push(byte),
                Err(e) => return Some(Err(e.into())),
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}

/// Wrapper around an iterator of chunks of bytes.
///
/// Implements `BufRead`.
pub struct BufReadAdapter<I: Iterator<Item = Item>> {
    /// The (perhaps partially-consumed) current chunk.
    curr_chunk: Cursor<Vec<u8>>,

    /// The source of all future chunks.
    chunks: I,
}

impl<I: Iterator<Item = Item>> BufReadAdapter<I> {
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            curr_chunk: Cursor::default(),
        }
    }
}

impl<I: Iterator<Item = Item>> BufRead for BufReadAdapter<I> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.curr_chunk.fill_buf()?.is_empty() {
            // Get the next chunk, if any.
            self.curr_chunk = match self.chunks.next() {
                Some(new_chunk) => Cursor::new(new_chunk?),
                None => Cursor::default(),
            };
        }

        self.curr_chunk.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.curr_chunk.consume(amt);
    }
}

impl<I: Iterator<Item = Item>> Read for BufReadAdapter<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.fill_buf()?.read(buf)?;
        self.consume(n);

        Ok(n)
    }
}
