//! Human-readable byte sizes.

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count with base-1024 units, rounded to two decimals.
///
/// Returns `None` for zero bytes.
///
/// ```
/// use archive_utils::bytes_to_human;
/// assert_eq!(bytes_to_human(1536).as_deref(), Some("1.5 KB"));
/// ```
pub fn bytes_to_human(bytes: u64) -> Option<String> {
    if bytes == 0 {
        return None;
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    Some(format!("{} {}", rounded, UNITS[unit]))
}
