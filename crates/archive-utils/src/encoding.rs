//! Base64 conversions and raw byte writers.

use std::fs;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode bytes as standard padded base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Strictly decode standard base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data)
}

/// True when `data` is non-empty, decodes strictly, and re-encodes to the
/// exact same string.
pub fn is_base64(data: &str) -> bool {
    if data.is_empty() {
        return false;
    }
    match STANDARD.decode(data) {
        Ok(decoded) => STANDARD.encode(decoded) == data,
        Err(_) => false,
    }
}

/// Decode base64 `data` and write it to `path`.
///
/// Returns `Ok(None)` for empty input, otherwise the number of bytes written.
pub fn write_base64(data: &str, path: &Path) -> io::Result<Option<u64>> {
    if data.is_empty() {
        return Ok(None);
    }
    let content = STANDARD
        .decode(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_bytes(&content, path)
}

/// Write raw bytes to `path`, creating parent directories.
///
/// Returns `Ok(None)` for empty input, otherwise the number of bytes written.
pub fn write_bytes(data: &[u8], path: &Path) -> io::Result<Option<u64>> {
    if data.is_empty() {
        return Ok(None);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(Some(data.len() as u64))
}
