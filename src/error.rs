use thiserror::Error;

/// Errors produced while building, packing, or decoding Huffman codes.
#[derive(Debug, Error)]
pub enum Error {
    /// The input has no symbols, so there is nothing to build a tree from.
    #[error("input is empty")]
    EmptyInput,

    /// The packed bit-string did not end on a byte boundary.
    #[error("packed bit-string length {0} is not a multiple of 8")]
    Packing(usize),

    /// The payload or table is malformed.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// Decoding was requested without a usable code table.
    #[error("missing code table: {0}")]
    MissingCodeTable(String),

    /// A symbol was handed to the packer that the code table does not cover.
    #[error("symbol {0:#04x} has no code in the table")]
    UnknownSymbol(u8),

    /// Symbol counts add up to more than `usize` can hold.
    #[error("symbol counts overflow: {0}")]
    Overflow(String),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A table document is not valid JSON of the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::CorruptData`].
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Error::CorruptData(msg.into())
    }

    /// Shorthand for [`Error::MissingCodeTable`].
    pub fn missing_table<S: Into<String>>(msg: S) -> Self {
        Error::MissingCodeTable(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
