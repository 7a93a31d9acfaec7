use crate::error::{Error, Result};
use crate::huffman::CodeTable;
use bitvec::prelude::*;

/// Width of the header that records the padding count.
pub const HEADER_BITS: usize = 8;

/// Largest padding count a well-formed payload can carry.
pub const MAX_PADDING: u8 = 7;

/// Number of zero bits needed to bring `bit_len` up to a byte boundary.
///
/// Already aligned streams get no padding.
pub fn padding_for(bit_len: usize) -> u8 {
    ((8 - bit_len % 8) % 8) as u8
}

/// Replace each symbol by its code and pack the result into bytes.
///
/// The payload is one header byte holding the padding count, followed by the
/// concatenated codes (most significant bit first) and that many zero bits.
///
/// # Errors
///
/// Returns [`Error::UnknownSymbol`] if a symbol has no code, and
/// [`Error::Packing`] if the framed stream is not byte aligned.
///
/// # Example
///
/// ```
/// use huffpack::huffman::{build_code_tables, build_huffman_tree, pack, FrequencyTable};
///
/// let freq = FrequencyTable::from_symbols(b"x").unwrap();
/// let (codes, _) = build_code_tables(&build_huffman_tree(&freq).unwrap());
/// // One bit of data, seven bits of padding.
/// assert_eq!(pack(b"x", &codes).unwrap(), vec![7, 0]);
/// ```
pub fn pack(symbols: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(HEADER_BITS + symbols.len() * 2);
    // Header placeholder, filled in once the data length is known.
    bits.resize(HEADER_BITS, false);

    for &symbol in symbols {
        let code = codes.get(symbol).ok_or(Error::UnknownSymbol(symbol))?;
        bits.extend_from_bitslice(code);
    }

    let data_bits = bits.len() - HEADER_BITS;
    let padding = padding_for(data_bits);
    bits[..HEADER_BITS].store_be::<u8>(padding);
    bits.resize(bits.len() + usize::from(padding), false);

    if bits.len() % 8 != 0 {
        return Err(Error::Packing(bits.len()));
    }

    log::debug!(
        "packed {} symbols into {} data bits, {} padding bits",
        symbols.len(),
        data_bits,
        padding
    );
    Ok(bits.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::{build_code_tables, build_huffman_tree, FrequencyTable};

    fn codes_for(input: &[u8]) -> CodeTable {
        let freq = FrequencyTable::from_symbols(input).unwrap();
        build_code_tables(&build_huffman_tree(&freq).unwrap()).0
    }

    #[test]
    fn test_padding_for() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 7);
        assert_eq!(padding_for(7), 1);
        assert_eq!(padding_for(8), 0);
        assert_eq!(padding_for(33), 7);
        assert_eq!(padding_for(64), 0);
        for len in 0..100 {
            assert!(padding_for(len) <= MAX_PADDING);
            assert_eq!((len + padding_for(len) as usize) % 8, 0);
        }
    }

    #[test]
    fn test_known_payload() {
        let input = b"aaaaaaabbbbbbbcccd";
        let payload = pack(input, &codes_for(input)).unwrap();
        assert_eq!(payload, vec![0x07, 0xFF, 0xFC, 0x05, 0xB6, 0x00]);
        // 33 code bits -> one header byte plus five data bytes.
        assert_eq!(payload.len(), 1 + 33usize.div_ceil(8));
    }

    #[test]
    fn test_aligned_stream_has_no_padding() {
        let input = b"xxxxxxxx";
        let payload = pack(input, &codes_for(input)).unwrap();
        assert_eq!(payload, vec![0, 0]);
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = codes_for(b"ab");
        assert!(matches!(
            pack(b"abc", &codes),
            Err(Error::UnknownSymbol(b'c'))
        ));
    }
}
