//! PDF Info dictionary, copied into a flat record.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use lopdf::{Dictionary, Document, Object};
use serde::Serialize;

use archive_core::error::{ArchiveError, Result};

/// Serialized names of the typed fields; extras never shadow them.
const FIELD_NAMES: &[&str] = &[
    "title",
    "author",
    "subject",
    "keywords",
    "creator",
    "producer",
    "creation_date",
    "mod_date",
    "pages",
    "status",
    "comment",
];

/// Descriptive fields of a PDF, taken verbatim from its Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfMetadata {
    title: Option<String>,
    author: Option<String>,
    subject: Option<String>,
    keywords: Vec<String>,
    creator: Option<String>,
    producer: Option<String>,
    creation_date: Option<DateTime<Utc>>,
    mod_date: Option<DateTime<Utc>>,
    pages: Option<u32>,
    status: Option<String>,
    comment: Option<String>,
    /// Any other Info key, kept as decoded text.
    #[serde(flatten)]
    extras: BTreeMap<String, String>,
}

impl PdfMetadata {
    /// Read the Info dictionary of a loaded document.
    pub fn from_document(doc: &Document) -> Self {
        let mut metadata = match info_dictionary(doc) {
            Some(info) => Self::from_info(doc, info),
            None => Self::default(),
        };
        metadata.pages = Some(doc.get_pages().len() as u32);
        metadata
    }

    fn from_info(doc: &Document, info: &Dictionary) -> Self {
        let mut metadata = Self::default();

        for (key, value) in info.iter() {
            let key = String::from_utf8_lossy(key).into_owned();
            let Some(text) = object_to_string(doc, value) else {
                log::debug!("Skipping non-text Info entry {}", key);
                continue;
            };
            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }

            match key.as_str() {
                "Title" => metadata.title = Some(text),
                "Author" => metadata.author = Some(text),
                "Subject" => metadata.subject = Some(text),
                "Keywords" => metadata.keywords = split_keywords(&text),
                "Creator" => metadata.creator = Some(text),
                "Producer" => metadata.producer = Some(text),
                "Status" => metadata.status = Some(text),
                "Comment" => metadata.comment = Some(text),
                "CreationDate" | "ModDate" => match parse_pdf_date(&text) {
                    Some(date) if key == "CreationDate" => metadata.creation_date = Some(date),
                    Some(date) => metadata.mod_date = Some(date),
                    None => {
                        log::warn!("Unparseable {} `{}`", key, text);
                        metadata.extras.insert(key, text);
                    }
                },
                _ if FIELD_NAMES.contains(&key.as_str()) => {
                    log::warn!("Ignoring Info entry `{}` that shadows a metadata field", key);
                }
                _ => {
                    metadata.extras.insert(key, text);
                }
            }
        }

        metadata
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn producer(&self) -> Option<&str> {
        self.producer.as_deref()
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.creation_date
    }

    pub fn mod_date(&self) -> Option<DateTime<Utc>> {
        self.mod_date
    }

    /// Page count of the document.
    pub fn pages(&self) -> Option<u32> {
        self.pages
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }

    /// Flat key/value view; unset fields are `null`.
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ArchiveError::Encoding(e.to_string()))
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn object_to_string(doc: &Document, obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        Object::Reference(id) => match doc.get_object(*id).ok()? {
            // One level only, Info values never chain references
            Object::Reference(_) => None,
            inner => object_to_string(doc, inner),
        },
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, UTF-8 with BOM, otherwise
/// UTF-8 with a Latin-1 fallback.
pub(crate) fn decode_pdf_string(raw: &[u8]) -> String {
    if raw.len() >= 2 && raw[0] == 0xFE && raw[1] == 0xFF {
        let chars: Vec<u16> = raw[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&chars);
    }

    if raw.len() >= 3 && raw[0] == 0xEF && raw[1] == 0xBB && raw[2] == 0xBF {
        return String::from_utf8_lossy(&raw[3..]).into_owned();
    }

    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}

fn split_keywords(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`). Every field after the
/// year is optional; a missing offset means UTC.
pub(crate) fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;

    let offset_seconds = match s.get(14..15) {
        Some(sign @ ("+" | "-")) => {
            let digits: String = s[15..].chars().filter(|c| c.is_ascii_digit()).collect();
            let hours: i32 = digits.get(0..2).and_then(|h| h.parse().ok()).unwrap_or(0);
            let minutes: i32 = digits.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
            let total = hours * 3600 + minutes * 60;
            if sign == "-" {
                -total
            } else {
                total
            }
        }
        _ => 0,
    };

    FixedOffset::east_opt(offset_seconds)?
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
