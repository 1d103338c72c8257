//! PDF page rendering via `pdftoppm` (poppler-utils), re-encoded with the
//! `image` crate into the requested raster format.

use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use image::{DynamicImage, ImageFormat};

use archive_core::error::{ArchiveError, Result};
use archive_core::options::ArchiveOptions;

pub const DEFAULT_DPI: u32 = 300;

/// Handle to a renderer that was found on the system.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    binary: String,
    dpi: u32,
}

impl PageRenderer {
    /// Check that the renderer is available. Fails with `ExtensionMissing`
    /// otherwise.
    pub fn locate(binary: &str, dpi: u32) -> Result<Self> {
        // pdftoppm exits non-zero on `-v` in older poppler releases
        if !archive_utils::binary_spawns(binary, &["-v"]) {
            return Err(missing_renderer(binary));
        }
        Ok(Self {
            binary: binary.to_string(),
            dpi,
        })
    }

    pub fn from_options(options: &ArchiveOptions) -> Result<Self> {
        Self::locate(&options.renderer_binary, options.render_dpi)
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Render the zero-based page `index` of `pdf_path` to `format`.
    pub fn render(&self, pdf_path: &Path, index: usize, format: &str) -> Result<Vec<u8>> {
        let target = raster_format(format)?;
        let png = self.render_png(pdf_path, index + 1)?;
        if target == ImageFormat::Png {
            return Ok(png);
        }
        reencode(&png, target)
    }

    fn render_png(&self, pdf_path: &Path, page_num: usize) -> Result<Vec<u8>> {
        let tmp_dir = tempfile::TempDir::new()?;
        let prefix = tmp_dir.path().join("page");

        log::info!(
            "Rendering page {} of {} at {} DPI...",
            page_num,
            pdf_path.display(),
            self.dpi
        );

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(page_num.to_string())
            .arg("-l")
            .arg(page_num.to_string())
            .arg("-singlefile")
            .arg(pdf_path.as_os_str())
            .arg(prefix.as_os_str())
            .output()
            .map_err(|e| ArchiveError::Command(format!("Failed to run {}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArchiveError::Command(format!(
                "{} failed for page {}: {}",
                self.binary, page_num, stderr
            )));
        }

        let rendered = tmp_dir.path().join("page.png");
        std::fs::read(&rendered).map_err(|e| {
            ArchiveError::Command(format!(
                "Failed to read rendered page {}: {}",
                page_num, e
            ))
        })
    }
}

pub(crate) fn missing_renderer(binary: &str) -> ArchiveError {
    ArchiveError::ExtensionMissing(format!(
        "{} (poppler-utils). Install with: brew install poppler (macOS) \
         or apt install poppler-utils (Linux)",
        binary
    ))
}

/// Map an extension such as `jpg` or `webp` to an image format.
pub fn raster_format(ext: &str) -> Result<ImageFormat> {
    ImageFormat::from_extension(ext)
        .ok_or_else(|| ArchiveError::UnsupportedFormat(format!("raster format `{}`", ext)))
}

/// Decode a PNG and write it out again as `format`.
pub fn reencode(png: &[u8], format: ImageFormat) -> Result<Vec<u8>> {
    let img = image::load_from_memory_with_format(png, ImageFormat::Png)
        .map_err(|e| ArchiveError::Image(format!("Failed to decode rendered page: {}", e)))?;

    // JPEG has no alpha channel
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| ArchiveError::Image(format!("Failed to encode {:?}: {}", format, e)))?;
    Ok(buf)
}
