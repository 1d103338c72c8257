//! A parsed PDF with its metadata, page tree, objects and text.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use archive_core::error::{ArchiveError, Result};
use archive_core::format::ArchiveFormat;
use archive_core::reader::PageContent;

use crate::metadata::PdfMetadata;
use crate::render::PageRenderer;

/// Everything read out of a PDF at open time. Immutable afterwards.
pub struct ArchivePdf {
    path: PathBuf,
    extension: String,
    metadata: PdfMetadata,
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
    text: String,
    count: usize,
}

impl ArchivePdf {
    /// Parse the PDF at `path`.
    ///
    /// Fails with `FileNotFound` when the path does not exist and with
    /// `WrongFileType` when its extension is not `pdf`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArchiveError::FileNotFound(path.to_path_buf()));
        }

        let extension = archive_utils::extension(path).unwrap_or_default();
        let format = ArchiveFormat::from_extension(&extension);
        if format != Some(ArchiveFormat::Pdf) {
            return Err(ArchiveError::wrong_type(path, "pdf", format));
        }

        log::info!("Reading PDF: {}", path.display());

        let document = Document::load(path)
            .map_err(|e| ArchiveError::Pdf(format!("Failed to load PDF: {}", e)))?;

        let metadata = PdfMetadata::from_document(&document);
        let pages = document.get_pages();
        let page_numbers: Vec<u32> = pages.keys().copied().collect();

        let text = page_text(&document, &page_numbers)?;

        let count = metadata.pages().unwrap_or(0) as usize;
        log::info!("PDF has {} pages", count);

        Ok(Self {
            path: path.to_path_buf(),
            extension,
            metadata,
            document,
            pages,
            text,
            count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension as written in the file name.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Pdf
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn metadata(&self) -> &PdfMetadata {
        &self.metadata
    }

    /// The trailer dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.document.trailer
    }

    pub fn objects(&self) -> &BTreeMap<ObjectId, Object> {
        &self.document.objects
    }

    /// Page number (1-based) to page object.
    pub fn pages(&self) -> &BTreeMap<u32, ObjectId> {
        &self.pages
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// PDF header version, e.g. `1.7`.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Render the zero-based page `index` to `format`, base64-encoded when
    /// `base64` is set.
    pub fn extract(
        &self,
        renderer: &PageRenderer,
        index: usize,
        format: &str,
        base64: bool,
    ) -> Result<PageContent> {
        if index >= self.count {
            return Err(ArchiveError::PageOutOfRange {
                index,
                count: self.count,
            });
        }
        let data = renderer.render(&self.path, index, format)?;
        Ok(PageContent::new(data, base64))
    }

    /// The first page, rendered.
    pub fn cover(&self, renderer: &PageRenderer, format: &str, base64: bool) -> Result<PageContent> {
        self.extract(renderer, 0, format, base64)
    }

    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("path".into(), self.path.display().to_string().into());
        map.insert("extension".into(), self.extension.clone().into());
        map.insert("count".into(), self.count.into());
        map.insert("text".into(), self.text.clone().into());
        map
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_map()).map_err(|e| ArchiveError::Encoding(e.to_string()))
    }
}

/// Text of the given 1-based pages. Any extraction error fails the caller.
fn page_text(document: &Document, page_numbers: &[u32]) -> Result<String> {
    document
        .extract_text(page_numbers)
        .map_err(|e| ArchiveError::Pdf(format!("Failed to extract text: {}", e)))
}

impl fmt::Display for ArchivePdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl fmt::Debug for ArchivePdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchivePdf")
            .field("path", &self.path)
            .field("count", &self.count)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
