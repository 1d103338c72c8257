//! File name and extension helpers.

use std::path::Path;

/// Extensions treated as images inside an archive.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "ico", "avif",
];

/// Extension of a path, without the leading dot.
pub fn extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_string())
}

/// Check an extension against the image allow-list (case-insensitive).
pub fn is_image(ext: Option<&str>) -> bool {
    match ext {
        Some(ext) => {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// A file is hidden when its name starts with a dot.
pub fn is_hidden(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.'),
        // `..` and `/` have no file name
        None => path.to_str().map(|s| s.starts_with('.')).unwrap_or(false),
    }
}
