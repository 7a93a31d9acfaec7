//! Huffman coding engine.
//!
//! This module covers the whole coding pipeline:
//! - Frequency analysis of a byte stream
//! - Tree construction with a deterministic tie-break
//! - Code table derivation (symbol to code and back)
//! - Bit packing behind a one-byte padding header
//! - Decoding by prefix matching
//!
//! # Payload layout
//!
//! ```text
//! [padding count: 1 byte, 0..=7][code bits, MSB first][padding zero bits]
//! ```
//!
//! The payload is not self-describing: the [`ReverseTable`] returned by
//! [`compress`] has to be kept alongside it.
//!
//! # Examples
//!
//! ```rust
//! use huffpack::huffman::{compress, decompress};
//!
//! let input = b"aaaaaaabbbbbbbcccd";
//! let (table, payload) = compress(input).unwrap();
//! assert_eq!(payload.len(), 6);
//! assert_eq!(decompress(&payload, &table).unwrap(), input);
//! ```

pub use crate::error::Result;

pub mod code_table;
pub mod decoder;
pub mod frequency;
pub mod packer;
pub mod tree;

pub use code_table::{
    build_code_tables, code_to_string, parse_code, Code, CodeTable, ReverseTable,
};
pub use decoder::{decode, unframe};
pub use frequency::FrequencyTable;
pub use packer::{pack, padding_for, HEADER_BITS, MAX_PADDING};
pub use tree::{build_huffman_tree, HuffmanNode};

/// A code built for one frequency table, reusable for many inputs drawn
/// from the same alphabet.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    codes: CodeTable,
    reverse: ReverseTable,
}

impl HuffmanCodec {
    /// Build a codec from the symbol statistics of `symbols`.
    pub fn new(symbols: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_symbols(symbols)?)
    }

    /// Build a codec from an existing frequency table.
    pub fn from_frequencies(freq_table: &FrequencyTable) -> Result<Self> {
        let tree = build_huffman_tree(freq_table)?;
        let (codes, reverse) = build_code_tables(&tree);
        Ok(HuffmanCodec { codes, reverse })
    }

    /// Wrap an existing reverse table, e.g. one loaded from disk.
    pub fn from_reverse_table(reverse: ReverseTable) -> Self {
        HuffmanCodec {
            codes: reverse.to_code_table(),
            reverse,
        }
    }

    /// Symbol to code mapping used by [`encode`](Self::encode).
    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    /// Code to symbol mapping; persist this next to every payload.
    pub fn reverse_table(&self) -> &ReverseTable {
        &self.reverse
    }

    /// Pack `symbols` into a payload. Every symbol must have a code.
    pub fn encode(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        pack(symbols, &self.codes)
    }

    /// Recover the symbols of a payload made with this codec's table.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        decode(payload, &self.reverse)
    }

    /// Give up the codec, keeping only the table a decoder needs.
    pub fn into_reverse_table(self) -> ReverseTable {
        self.reverse
    }
}

/// Compress `symbols`, returning the reverse table and the packed payload.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`](crate::Error::EmptyInput) for an empty slice.
pub fn compress(symbols: &[u8]) -> Result<(ReverseTable, Vec<u8>)> {
    let codec = HuffmanCodec::new(symbols)?;
    let payload = codec.encode(symbols)?;
    Ok((codec.into_reverse_table(), payload))
}

/// Reverse [`compress`].
pub fn decompress(payload: &[u8], table: &ReverseTable) -> Result<Vec<u8>> {
    decode(payload, table)
}
