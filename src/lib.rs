pub mod archive;
pub mod error;
pub mod huffman;
pub mod table_format;

pub use archive::{Archive, ArchiveConfig};
pub use error::{Error, Result};
pub use huffman::{compress, decompress, HuffmanCodec, ReverseTable};
