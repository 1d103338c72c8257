//! The reader trait implemented by every archive-like document.

use std::path::{Path, PathBuf};

use crate::entry::ArchiveEntry;
use crate::error::{ArchiveError, Result};
use crate::format::ArchiveFormat;

/// Rendered or extracted content, either raw or base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Raw(Vec<u8>),
    Base64(String),
}

impl PageContent {
    pub fn new(data: Vec<u8>, base64: bool) -> Self {
        if base64 {
            PageContent::Base64(archive_utils::encode_base64(&data))
        } else {
            PageContent::Raw(data)
        }
    }

    pub fn is_base64(&self) -> bool {
        matches!(self, PageContent::Base64(_))
    }

    /// The bytes as returned: base64 text stays encoded.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PageContent::Raw(data) => data,
            PageContent::Base64(text) => text.as_bytes(),
        }
    }

    /// Decoded bytes, whatever the representation.
    pub fn into_decoded(self) -> Result<Vec<u8>> {
        match self {
            PageContent::Raw(data) => Ok(data),
            PageContent::Base64(text) => archive_utils::decode_base64(&text)
                .map_err(|e| ArchiveError::Encoding(e.to_string())),
        }
    }

    /// Write the decoded content to `path`.
    pub fn write_to(&self, path: &Path) -> Result<Option<u64>> {
        let written = match self {
            PageContent::Raw(data) => archive_utils::write_bytes(data, path)?,
            PageContent::Base64(text) => archive_utils::write_base64(text, path)?,
        };
        Ok(written)
    }
}

/// A document whose contents are listed as entries and read one at a time.
pub trait ArchiveReader {
    /// Path of the underlying file.
    fn path(&self) -> &Path;

    fn format(&self) -> ArchiveFormat;

    /// Listed entries, in archive order.
    fn files(&self) -> &[ArchiveEntry];

    /// Read the bytes of a single entry.
    fn content(&self, entry: &ArchiveEntry) -> Result<Vec<u8>>;

    fn count(&self) -> usize {
        self.files().len()
    }

    fn first(&self) -> Option<&ArchiveEntry> {
        self.files().first()
    }

    fn last(&self) -> Option<&ArchiveEntry> {
        self.files().last()
    }

    fn find(&self, path: &str) -> Option<&ArchiveEntry> {
        self.files().iter().find(|e| e.path == path)
    }

    /// File stem of the archive, handy as an output directory name.
    fn basename(&self) -> String {
        self.path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extract `entries` under `output_dir` and return the written paths.
    fn extract(&self, output_dir: &Path, entries: &[&ArchiveEntry]) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;
        let mut written = Vec::with_capacity(entries.len());
        for entry in entries {
            let data = self.content(entry)?;
            let out_path = entry.output_path(output_dir);
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&out_path, &data)?;
            written.push(out_path);
        }
        Ok(written)
    }

    /// Extract every listed entry under `output_dir`.
    fn extract_all(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries: Vec<&ArchiveEntry> = self.files().iter().collect();
        self.extract(output_dir, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryArchive {
        path: PathBuf,
        entries: Vec<ArchiveEntry>,
    }

    impl ArchiveReader for MemoryArchive {
        fn path(&self) -> &Path {
            &self.path
        }

        fn format(&self) -> ArchiveFormat {
            ArchiveFormat::Zip
        }

        fn files(&self) -> &[ArchiveEntry] {
            &self.entries
        }

        fn content(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
            Ok(entry.path.as_bytes().to_vec())
        }
    }

    fn sample() -> MemoryArchive {
        MemoryArchive {
            path: PathBuf::from("/comics/issue-01.cbz"),
            entries: vec![
                ArchiveEntry::new("001.jpg", 7),
                ArchiveEntry::new("nested/002.jpg", 14),
            ],
        }
    }

    #[test]
    fn test_default_accessors() {
        let archive = sample();
        assert_eq!(archive.count(), 2);
        assert_eq!(archive.first().unwrap().path, "001.jpg");
        assert_eq!(archive.last().unwrap().path, "nested/002.jpg");
        assert!(archive.find("nested/002.jpg").is_some());
        assert!(archive.find("003.jpg").is_none());
        assert_eq!(archive.basename(), "issue-01");
    }

    #[test]
    fn test_default_extract_all() {
        let dir = tempfile::TempDir::new().unwrap();
        let archive = sample();
        let paths = archive.extract_all(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(std::fs::read(&paths[1]).unwrap(), b"nested/002.jpg");
    }

    #[test]
    fn test_page_content() {
        let raw = PageContent::new(b"jpeg".to_vec(), false);
        assert!(!raw.is_base64());
        assert_eq!(raw.as_bytes(), b"jpeg");

        let encoded = PageContent::new(b"jpeg".to_vec(), true);
        assert!(encoded.is_base64());
        assert_eq!(encoded.as_bytes(), b"anBlZw==");
        assert_eq!(encoded.into_decoded().unwrap(), b"jpeg");
    }
}
