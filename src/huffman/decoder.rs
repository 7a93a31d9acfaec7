use crate::error::{Error, Result};
use crate::huffman::packer::MAX_PADDING;
use crate::huffman::{Code, ReverseTable};
use bitvec::prelude::*;

/// Strip the framing from a payload and return its data bits.
///
/// The first byte is the padding count; that many bits are dropped from the
/// end of the remaining bytes. Every byte after the header is part of the
/// stream.
///
/// # Errors
///
/// Returns [`Error::CorruptData`] if the header is missing or above 7, if the
/// padding is longer than the stream, or if a padding bit is set.
pub fn unframe(payload: &[u8]) -> Result<&BitSlice<u8, Msb0>> {
    let (&header, body) = payload
        .split_first()
        .ok_or_else(|| Error::corrupt("payload is missing its header byte"))?;
    if header > MAX_PADDING {
        return Err(Error::corrupt(format!(
            "padding count {header} is outside 0..={MAX_PADDING}"
        )));
    }

    let bits = body.view_bits::<Msb0>();
    let padding = usize::from(header);
    if padding > bits.len() {
        return Err(Error::corrupt(format!(
            "padding count {padding} exceeds the {} available bits",
            bits.len()
        )));
    }

    let (data, pad) = bits.split_at(bits.len() - padding);
    if pad.any() {
        return Err(Error::corrupt("padding bits are not zero"));
    }
    Ok(data)
}

/// Decode a payload produced by [`pack`](crate::huffman::pack).
///
/// Bits are accumulated one at a time; whenever the buffer equals a code in
/// `table`, its symbol is emitted and the buffer restarts.
///
/// # Errors
///
/// - [`Error::MissingCodeTable`] if `table` is empty.
/// - [`Error::CorruptData`] for bad framing, for a buffer that grows past the
///   longest code without a match, or for bits left over at the end.
pub fn decode(payload: &[u8], table: &ReverseTable) -> Result<Vec<u8>> {
    if table.is_empty() {
        return Err(Error::missing_table("reverse table has no entries"));
    }
    let bits = unframe(payload)?;
    let max_len = table.max_code_len();

    let mut output = Vec::with_capacity(bits.len() / max_len.max(1));
    let mut buffer = Code::with_capacity(max_len);
    for (pos, bit) in bits.iter().by_vals().enumerate() {
        buffer.push(bit);
        if let Some(symbol) = table.get(&buffer) {
            output.push(symbol);
            buffer.clear();
        } else if buffer.len() >= max_len {
            return Err(Error::corrupt(format!(
                "bits ending at offset {pos} match no code"
            )));
        }
    }

    if !buffer.is_empty() {
        return Err(Error::corrupt(format!(
            "{} trailing bits do not form a complete code",
            buffer.len()
        )));
    }
    log::debug!("decoded {} symbols from {} bits", output.len(), bits.len());
    Ok(output)
}
