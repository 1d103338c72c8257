//! PDF reader: metadata, objects, pages and text through `lopdf`, page
//! rasterisation through `pdftoppm`.

mod document;
pub mod metadata;
mod pages;
pub mod render;

pub use document::ArchivePdf;
pub use metadata::PdfMetadata;
pub use pages::PdfArchive;
pub use render::PageRenderer;
