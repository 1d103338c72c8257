//! Parse the technical listing printed by `7z l -slt`.
//!
//! The listing starts with a header describing the archive itself, then a
//! `----------` separator, then one `Key = Value` block per entry separated by
//! blank lines.

use archive_core::entry::ArchiveEntry;

const SEPARATOR: &str = "----------";

/// Parse every entry block after the separator line.
pub fn parse_listing(output: &str) -> Vec<ArchiveEntry> {
    let mut entries = Vec::new();
    let mut lines = output.lines().skip_while(|line| line.trim() != SEPARATOR);
    // Skip the separator itself
    lines.next();

    let mut block: Vec<(&str, &str)> = Vec::new();
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            if let Some(entry) = entry_from_block(&block) {
                entries.push(entry);
            }
            block.clear();
            continue;
        }
        match line.split_once(" = ") {
            Some((key, value)) => block.push((key.trim(), value)),
            // `Key =` with an empty value has no trailing space
            None => match line.strip_suffix(" =") {
                Some(key) => block.push((key.trim(), "")),
                None => log::warn!("Unexpected listing line: {}", line),
            },
        }
    }
    if let Some(entry) = entry_from_block(&block) {
        entries.push(entry);
    }

    entries
}

fn entry_from_block(block: &[(&str, &str)]) -> Option<ArchiveEntry> {
    let get = |name: &str| {
        block
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    };

    let path = get("Path")?.replace('\\', "/");
    if path.is_empty() {
        return None;
    }

    let is_dir = get("Folder") == Some("+")
        || get("Attributes").map(|a| a.starts_with('D')).unwrap_or(false);

    Some(ArchiveEntry {
        path,
        size: get("Size").and_then(|s| s.parse().ok()).unwrap_or(0),
        packed_size: get("Packed Size").and_then(|s| s.parse().ok()),
        modified: get("Modified").filter(|m| !m.is_empty()).map(str::to_string),
        is_dir,
    })
}
