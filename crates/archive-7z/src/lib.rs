//! Archive reader backed by the `7z` command-line binary.

mod archive;
mod binary;
pub mod listing;

pub use archive::SevenZipArchive;
pub use binary::SevenZip;
