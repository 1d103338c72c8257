//! Options shared by the readers and the CLI.

use serde::{Deserialize, Serialize};

/// All options controlling how archives are opened and pages rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    // -- General --
    pub verbose: u8,

    // -- External tools --
    /// Archive binary, probed once at startup.
    pub seven_zip_binary: String,
    /// PDF page renderer (poppler's `pdftoppm`).
    pub renderer_binary: String,

    // -- Rendering --
    pub render_dpi: u32,
    /// Raster format for rendered pages, as a file extension.
    pub image_format: String,
    /// Return rendered content base64-encoded instead of raw bytes.
    pub base64: bool,

    // -- Listing --
    pub skip_hidden: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            seven_zip_binary: "7z".to_string(),
            renderer_binary: "pdftoppm".to_string(),
            render_dpi: 300,
            image_format: "jpg".to_string(),
            base64: true,
            skip_hidden: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ArchiveOptions::default();
        assert_eq!(opts.seven_zip_binary, "7z");
        assert_eq!(opts.render_dpi, 300);
        assert_eq!(opts.image_format, "jpg");
        assert!(opts.base64);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let opts: ArchiveOptions = toml::from_str("render_dpi = 150\nbase64 = false\n").unwrap();
        assert_eq!(opts.render_dpi, 150);
        assert!(!opts.base64);
        assert_eq!(opts.renderer_binary, "pdftoppm");
        assert!(opts.skip_hidden);
    }
}
