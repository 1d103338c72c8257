//! Shared types for the archive readers: errors, formats, entries, options
//! and the [`ArchiveReader`] trait.

pub mod entry;
pub mod error;
pub mod format;
pub mod options;
pub mod reader;

pub use entry::ArchiveEntry;
pub use error::{ArchiveError, Result};
pub use format::ArchiveFormat;
pub use options::ArchiveOptions;
pub use reader::{ArchiveReader, PageContent};
