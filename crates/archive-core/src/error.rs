use std::path::PathBuf;

use thiserror::Error;

use crate::format::ArchiveFormat;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{binary} is not installed or not in the PATH, please install it and try again")]
    BinaryNotFound { binary: String },

    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Wrong file type for {}: expected {expected}, found `{found}`", .path.display())]
    WrongFileType {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("{0} is not available, can't render pages")]
    ExtensionMissing(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    #[error("Page {index} is out of range, document has {count} pages")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ArchiveError {
    /// Build a `WrongFileType`, falling back to the raw extension when the
    /// format was not recognised.
    pub fn wrong_type(
        path: impl Into<PathBuf>,
        expected: &str,
        found: Option<ArchiveFormat>,
    ) -> Self {
        let path = path.into();
        let found = found
            .map(|f| f.extension().to_string())
            .or_else(|| archive_utils::extension(&path))
            .unwrap_or_default();
        ArchiveError::WrongFileType {
            path,
            expected: expected.to_string(),
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
