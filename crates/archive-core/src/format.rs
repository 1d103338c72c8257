//! Archive and document formats, detected from the file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Zip,
    Rar,
    SevenZip,
    Tar,
    Pdf,
}

impl ArchiveFormat {
    /// Parse from file extension. Comic book extensions map to their
    /// container format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "zip" | "cbz" | "epub" => Some(Self::Zip),
            "rar" | "cbr" => Some(Self::Rar),
            "7z" | "cb7" => Some(Self::SevenZip),
            "tar" | "cbt" => Some(Self::Tar),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect the format of a path from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZip => "7z",
            Self::Tar => "tar",
            Self::Pdf => "pdf",
        }
    }

    /// Get MIME type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::Rar => "application/vnd.rar",
            Self::SevenZip => "application/x-7z-compressed",
            Self::Tar => "application/x-tar",
            Self::Pdf => "application/pdf",
        }
    }

    /// Whether the format is read through the archive binary.
    pub fn is_archive(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(ArchiveFormat::from_extension("cbz"), Some(ArchiveFormat::Zip));
        assert_eq!(ArchiveFormat::from_extension("CBR"), Some(ArchiveFormat::Rar));
        assert_eq!(ArchiveFormat::from_extension("cb7"), Some(ArchiveFormat::SevenZip));
        assert_eq!(ArchiveFormat::from_extension("cbt"), Some(ArchiveFormat::Tar));
        assert_eq!(ArchiveFormat::from_extension("pdf"), Some(ArchiveFormat::Pdf));
        assert_eq!(ArchiveFormat::from_extension("docx"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ArchiveFormat::from_path(Path::new("/comics/Issue 01.cbz")),
            Some(ArchiveFormat::Zip)
        );
        assert_eq!(ArchiveFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_display_and_archive_flag() {
        assert_eq!(ArchiveFormat::SevenZip.to_string(), "7Z");
        assert!(ArchiveFormat::Rar.is_archive());
        assert!(!ArchiveFormat::Pdf.is_archive());
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(ArchiveFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(ArchiveFormat::Rar.mime_type(), "application/vnd.rar");
    }
}
