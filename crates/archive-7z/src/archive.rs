//! Archives read through the `7z` binary: cbz, cbr, cb7, cbt and their
//! plain zip/rar/7z/tar counterparts.

use std::fmt;
use std::path::{Path, PathBuf};

use archive_core::entry::ArchiveEntry;
use archive_core::error::{ArchiveError, Result};
use archive_core::format::ArchiveFormat;
use archive_core::options::ArchiveOptions;
use archive_core::reader::ArchiveReader;

use crate::binary::SevenZip;
use crate::listing;

#[derive(Debug)]
pub struct SevenZipArchive {
    seven_zip: SevenZip,
    path: PathBuf,
    extension: String,
    format: ArchiveFormat,
    entries: Vec<ArchiveEntry>,
}

impl SevenZipArchive {
    /// List the archive at `path`. PDFs are refused with `WrongFileType`.
    pub fn open(
        seven_zip: &SevenZip,
        path: impl AsRef<Path>,
        options: &ArchiveOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArchiveError::FileNotFound(path.to_path_buf()));
        }

        let extension = archive_utils::extension(path).unwrap_or_default();
        let format = match ArchiveFormat::from_extension(&extension) {
            Some(format) if format.is_archive() => format,
            other => return Err(ArchiveError::wrong_type(path, "archive", other)),
        };

        log::info!("Reading {} archive: {}", format, path.display());

        let output = seven_zip.run("l", &["-slt".to_string()], path, &[])?;
        let listing = String::from_utf8_lossy(&output.stdout);

        let entries: Vec<ArchiveEntry> = listing::parse_listing(&listing)
            .into_iter()
            .filter(|entry| !entry.is_dir)
            .filter(|entry| !(options.skip_hidden && entry.is_hidden()))
            .collect();

        log::info!("Archive has {} files", entries.len());

        Ok(Self {
            seven_zip: seven_zip.clone(),
            path: path.to_path_buf(),
            extension,
            format,
            entries,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Only the entries with an image extension, in archive order.
    pub fn images(&self) -> Vec<&ArchiveEntry> {
        self.entries.iter().filter(|e| e.is_image()).collect()
    }

    /// Sum of uncompressed entry sizes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    fn ensure_listed(&self, entry: &ArchiveEntry) -> Result<()> {
        if self.find(&entry.path).is_none() {
            return Err(ArchiveError::EntryNotFound(entry.path.clone()));
        }
        Ok(())
    }
}

impl ArchiveReader for SevenZipArchive {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn files(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn content(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        self.ensure_listed(entry)?;
        let output = self
            .seven_zip
            .run("x", &["-so".to_string()], &self.path, &[entry.path.as_str()])?;
        Ok(output.stdout)
    }

    fn extract(&self, output_dir: &Path, entries: &[&ArchiveEntry]) -> Result<Vec<PathBuf>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        for entry in entries {
            self.ensure_listed(entry)?;
        }
        std::fs::create_dir_all(output_dir)?;

        let switches = vec!["-y".to_string(), format!("-o{}", output_dir.display())];
        let names: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();

        log::info!(
            "Extracting {} files from {} to {}",
            names.len(),
            self.path.display(),
            output_dir.display()
        );
        self.seven_zip.run("x", &switches, &self.path, &names)?;

        Ok(entries.iter().map(|e| e.output_path(output_dir)).collect())
    }

    fn extract_all(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;
        let switches = vec!["-y".to_string(), format!("-o{}", output_dir.display())];

        log::info!("Extracting {} to {}", self.path.display(), output_dir.display());
        self.seven_zip.run("x", &switches, &self.path, &[])?;

        Ok(self.entries.iter().map(|e| e.output_path(output_dir)).collect())
    }
}

impl fmt::Display for SevenZipArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
