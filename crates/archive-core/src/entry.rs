//! A single file inside an archive.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated.
    pub path: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    pub packed_size: Option<u64>,
    /// Modification time as reported by the archive tool.
    pub modified: Option<String>,
    pub is_dir: bool,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            packed_size: None,
            modified: None,
            is_dir: false,
        }
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn extension(&self) -> Option<String> {
        archive_utils::extension(self.file_name())
    }

    pub fn is_image(&self) -> bool {
        archive_utils::is_image(self.extension().as_deref())
    }

    /// Dotfiles and macOS resource forks.
    pub fn is_hidden(&self) -> bool {
        archive_utils::is_hidden(self.file_name())
            || self.path.split('/').any(|part| part == "__MACOSX")
    }

    /// Where this entry lands when extracted under `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> std::path::PathBuf {
        self.path
            .split('/')
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .fold(output_dir.to_path_buf(), |acc, part| acc.join(part))
    }
}
