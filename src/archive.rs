//! File-level wrapper around the coding engine.
//!
//! Compressing `notes.txt` writes the payload to `notes.bin` and the reverse
//! table to `notes_table.bin` next to it. Decompressing a payload reads the
//! table back from the same place and writes `notes_decompressed.txt`.

use crate::error::{Error, Result};
use crate::huffman::{compress, decompress, ReverseTable};
use crate::table_format;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Naming and input handling for [`Archive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Extension of the payload and table files
    pub payload_extension: String,
    /// Appended to the source stem to name the table file
    pub table_suffix: String,
    /// Appended to the source stem to name the restored file
    pub decompressed_suffix: String,
    /// Extension of the restored file
    pub decompressed_extension: String,
    /// Drop trailing ASCII whitespace from the input before compressing
    pub trim_trailing_whitespace: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            payload_extension: "bin".to_string(),
            table_suffix: "_table".to_string(),
            decompressed_suffix: "_decompressed".to_string(),
            decompressed_extension: "txt".to_string(),
            trim_trailing_whitespace: false,
        }
    }
}

/// A source file and the artifacts derived from it.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    config: ArchiveConfig,
}

impl Archive {
    pub fn new<P: AsRef<Path>>(path: P, config: ArchiveConfig) -> Self {
        Archive {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.path
    }

    pub fn payload_path(&self) -> Result<PathBuf> {
        self.sibling("", &self.config.payload_extension)
    }

    pub fn table_path(&self) -> Result<PathBuf> {
        self.sibling(&self.config.table_suffix, &self.config.payload_extension)
    }

    pub fn decompressed_path(&self) -> Result<PathBuf> {
        self.sibling(
            &self.config.decompressed_suffix,
            &self.config.decompressed_extension,
        )
    }

    /// Compress the source file, writing the payload and table files.
    ///
    /// Returns the path of the payload file.
    pub fn compress(&self) -> Result<PathBuf> {
        let mut data = fs::read(&self.path)?;
        if self.config.trim_trailing_whitespace {
            let kept = data.trim_ascii_end().len();
            data.truncate(kept);
        }

        let payload_path = self.payload_path()?;
        let table_path = self.table_path()?;
        self.refuse_overwrite(&payload_path)?;
        self.refuse_overwrite(&table_path)?;

        let (table, payload) = compress(&data)?;
        fs::write(&table_path, table_format::to_json(&table)?)?;
        fs::write(&payload_path, &payload)?;

        log::info!(
            "compressed {} ({} bytes) into {} ({} bytes, {} codes)",
            self.path.display(),
            data.len(),
            payload_path.display(),
            payload.len(),
            table.len()
        );
        Ok(payload_path)
    }

    /// Restore the payload at `input` using the table stored next to the
    /// source file. Returns the path of the restored file.
    pub fn decompress<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf> {
        let input = input.as_ref();
        let output_path = self.decompressed_path()?;
        self.refuse_overwrite(&output_path)?;
        if output_path.as_path() == input {
            return Err(overwrite_error(&output_path));
        }

        let table = self.load_table()?;
        let payload = fs::read(input)?;
        let restored = decompress(&payload, &table)?;

        fs::write(&output_path, &restored)?;
        log::info!(
            "decompressed {} into {} ({} bytes)",
            input.display(),
            output_path.display(),
            restored.len()
        );
        Ok(output_path)
    }

    /// Read the persisted reverse table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCodeTable`] if the table file does not exist.
    pub fn load_table(&self) -> Result<ReverseTable> {
        table_format::read_file(self.table_path()?)
    }

    // A derived path equal to the source would clobber the file being read.
    fn refuse_overwrite(&self, target: &Path) -> Result<()> {
        if target == self.path.as_path() {
            return Err(overwrite_error(target));
        }
        Ok(())
    }

    fn sibling(&self, suffix: &str, extension: &str) -> Result<PathBuf> {
        let stem = self.path.file_stem().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", self.path.display()),
            )
        })?;
        let mut name = OsString::from(stem);
        name.push(suffix);
        if !extension.is_empty() {
            name.push(".");
            name.push(extension);
        }
        Ok(self.path.with_file_name(name))
    }
}

fn overwrite_error(path: &Path) -> Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} would overwrite its own input", path.display()),
    )
    .into()
}
