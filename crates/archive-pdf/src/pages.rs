//! Read a PDF like an archive: one image entry per page.

use std::path::Path;

use archive_core::entry::ArchiveEntry;
use archive_core::error::{ArchiveError, Result};
use archive_core::format::ArchiveFormat;
use archive_core::options::ArchiveOptions;
use archive_core::reader::ArchiveReader;

use crate::document::ArchivePdf;
use crate::render::{self, PageRenderer};

pub struct PdfArchive {
    pdf: ArchivePdf,
    /// `None` when the renderer was not found; listing still works.
    renderer: Option<PageRenderer>,
    renderer_binary: String,
    image_format: String,
    entries: Vec<ArchiveEntry>,
}

impl PdfArchive {
    pub fn new(pdf: ArchivePdf, renderer: PageRenderer, image_format: &str) -> Result<Self> {
        let binary = renderer.binary().to_string();
        Self::build(pdf, Some(renderer), binary, image_format)
    }

    /// Open `path` and look for the renderer configured in `options`. A
    /// missing renderer only fails page reads, not the listing.
    pub fn open(path: impl AsRef<Path>, options: &ArchiveOptions) -> Result<Self> {
        let pdf = ArchivePdf::open(path)?;
        let renderer = match PageRenderer::from_options(options) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::debug!("Pages can be listed but not rendered: {}", e);
                None
            }
        };
        Self::build(
            pdf,
            renderer,
            options.renderer_binary.clone(),
            &options.image_format,
        )
    }

    fn build(
        pdf: ArchivePdf,
        renderer: Option<PageRenderer>,
        renderer_binary: String,
        image_format: &str,
    ) -> Result<Self> {
        render::raster_format(image_format)?;
        let count = pdf.count();
        let entries = (0..count)
            .map(|index| ArchiveEntry::new(page_entry_name(index, count, image_format), 0))
            .collect();
        Ok(Self {
            pdf,
            renderer,
            renderer_binary,
            image_format: image_format.to_string(),
            entries,
        })
    }

    pub fn pdf(&self) -> &ArchivePdf {
        &self.pdf
    }

    fn page_index(&self, entry: &ArchiveEntry) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.path == entry.path)
            .ok_or_else(|| ArchiveError::EntryNotFound(entry.path.clone()))
    }
}

impl ArchiveReader for PdfArchive {
    fn path(&self) -> &Path {
        self.pdf.path()
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Pdf
    }

    fn files(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn content(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        let index = self.page_index(entry)?;
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| render::missing_renderer(&self.renderer_binary))?;
        renderer.render(self.pdf.path(), index, &self.image_format)
    }
}

/// `page-001.jpg`, zero-padded to at least three digits so names sort.
fn page_entry_name(index: usize, count: usize, ext: &str) -> String {
    let width = count.to_string().len().max(3);
    format!("page-{:0>width$}.{}", index + 1, ext, width = width)
}
