use crate::error::{Error, Result};
use crate::huffman::HuffmanNode;
use bitvec::prelude::*;
use std::collections::BTreeMap;

/// A single codeword, most significant bit first.
pub type Code = BitVec<u8, Msb0>;

/// Render a code as a string of `'0'` and `'1'`.
pub fn code_to_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Parse a string of `'0'` and `'1'` into a code.
pub fn parse_code(text: &str) -> Result<Code> {
    let mut code = Code::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '0' => code.push(false),
            '1' => code.push(true),
            other => {
                return Err(Error::corrupt(format!(
                    "invalid character {other:?} in code {text:?}"
                )))
            }
        }
    }
    Ok(code)
}

/// Mapping from symbol to its Huffman code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// Sum of `2^-len` over all codes. A prefix code never exceeds 1.
    pub fn kraft_sum(&self) -> f64 {
        self.codes
            .values()
            .map(|code| 0.5f64.powi(code.len() as i32))
            .sum()
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes_are_prefix_free(&codes)
    }

    /// Build the inverse mapping.
    pub fn reverse(&self) -> ReverseTable {
        ReverseTable {
            symbols: self
                .codes
                .iter()
                .map(|(&symbol, code)| (code.clone(), symbol))
                .collect(),
        }
    }
}

/// Mapping from code back to symbol; the artifact a decoder needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReverseTable {
    symbols: BTreeMap<Code, u8>,
}

impl ReverseTable {
    /// Build a reverse table from `(code, symbol)` pairs, checking that it
    /// describes a usable prefix code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptData`] for an empty code, a duplicated code or
    /// symbol, or a code that is a prefix of another.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Code, u8)>,
    {
        let mut symbols = BTreeMap::new();
        let mut seen = [false; 256];
        for (code, symbol) in entries {
            if code.is_empty() {
                return Err(Error::corrupt(format!(
                    "symbol {symbol:#04x} has an empty code"
                )));
            }
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(Error::corrupt(format!(
                    "symbol {symbol:#04x} appears more than once"
                )));
            }
            let text = code_to_string(&code);
            if symbols.insert(code, symbol).is_some() {
                return Err(Error::corrupt(format!("code {text} appears more than once")));
            }
        }
        let codes: Vec<&Code> = symbols.keys().collect();
        if !codes_are_prefix_free(&codes) {
            return Err(Error::corrupt("codes do not form a prefix code"));
        }
        Ok(ReverseTable { symbols })
    }

    pub fn get(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over `(code, symbol)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&BitSlice<u8, Msb0>, u8)> + '_ {
        self.symbols
            .iter()
            .map(|(code, &symbol)| (code.as_bitslice(), symbol))
    }

    pub fn max_code_len(&self) -> usize {
        self.symbols.keys().map(|code| code.len()).max().unwrap_or(0)
    }

    /// Build the forward mapping.
    pub fn to_code_table(&self) -> CodeTable {
        CodeTable {
            codes: self
                .symbols
                .iter()
                .map(|(code, &symbol)| (symbol, code.clone()))
                .collect(),
        }
    }
}

// In lexicographic order a code that prefixes others is immediately followed
// by one of them, so checking neighbours is enough.
fn codes_are_prefix_free(codes: &[&Code]) -> bool {
    let mut sorted = codes.to_vec();
    sorted.sort();
    sorted
        .windows(2)
        .all(|pair| !pair[1].starts_with(pair[0].as_bitslice()))
}

/// Traverse the tree and produce the code table and its inverse.
///
/// Left edges append a 0 and right edges a 1. If the root is itself a leaf,
/// its symbol gets the code `0` so that it can still be written to a
/// bit-stream.
pub fn build_code_tables(root: &HuffmanNode) -> (CodeTable, ReverseTable) {
    let mut table = CodeTable::default();
    if let HuffmanNode::Leaf { symbol, .. } = root {
        table.codes.insert(*symbol, bitvec![u8, Msb0; 0]);
    } else {
        build_code_table_helper(root, Code::new(), &mut table.codes);
    }
    let reverse = table.reverse();
    log::debug!(
        "code table: {} symbols, longest code {} bits",
        table.len(),
        table.max_code_len()
    );
    (table, reverse)
}

fn build_code_table_helper(node: &HuffmanNode, prefix: Code, table: &mut BTreeMap<u8, Code>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            table.insert(*symbol, prefix);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_code_table_helper(left, left_prefix, table);
            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_code_table_helper(right, right_prefix, table);
        }
    }
}
