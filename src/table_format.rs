//! Textual form of a [`ReverseTable`].
//!
//! A table is stored as a single JSON object whose keys are codes written as
//! `'0'`/`'1'` strings and whose values are the byte each code stands for:
//!
//! ```text
//! {"0":98,"100":100,"101":99,"11":97}
//! ```
//!
//! Values are integers rather than characters so that any byte survives the
//! trip through a text file.

use crate::error::{Error, Result};
use crate::huffman::{code_to_string, parse_code, ReverseTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
struct TableDocument(BTreeMap<String, u8>);

/// Serialize a reverse table to its JSON object form.
pub fn to_json(table: &ReverseTable) -> Result<String> {
    let doc = TableDocument(
        table
            .iter()
            .map(|(code, symbol)| (code_to_string(code), symbol))
            .collect(),
    );
    Ok(serde_json::to_string(&doc)?)
}

/// Parse a reverse table from its JSON object form.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON or out-of-range values, and
/// [`Error::MissingCodeTable`] for an empty object. Codes that are not
/// binary strings or that do not form a prefix code are
/// [`Error::CorruptData`].
pub fn from_json(text: &str) -> Result<ReverseTable> {
    let TableDocument(entries) = serde_json::from_str(text)?;
    if entries.is_empty() {
        return Err(Error::missing_table("table document has no entries"));
    }
    let mut parsed = Vec::with_capacity(entries.len());
    for (code, symbol) in entries {
        parsed.push((parse_code(&code)?, symbol));
    }
    ReverseTable::from_entries(parsed)
}

/// Read a table file written with [`to_json`].
///
/// # Errors
///
/// Returns [`Error::MissingCodeTable`] if the file does not exist, otherwise
/// the errors of [`from_json`] or [`Error::Io`].
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ReverseTable> {
    let path = path.as_ref();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(Error::missing_table(format!(
                "{} does not exist",
                path.display()
            )))
        }
        Err(err) => return Err(err.into()),
    };
    from_json(&text)
}
