//! Data structures for format information

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One downloadable rendition, validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFormat {
    pub url: String,
    pub quality_label: Option<String>,
    pub mime_type: Option<String>,
    pub file_size_bytes: Option<u64>,
    pub itag: Option<String>,
}

impl MediaFormat {
    /// Ranking key: the first run of digits in the quality label, or 0
    pub fn quality_key(&self) -> u32 {
        self.quality_label.as_deref().map(quality_key).unwrap_or(0)
    }

    /// Label for display
    pub fn display_label(&self) -> &str {
        self.quality_label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or("Unknown Quality")
    }

    /// Container part of the MIME type, without codec parameters
    pub fn container(&self) -> Option<&str> {
        self.mime_type
            .as_deref()
            .and_then(|mime| mime.split(';').next())
            .map(str::trim)
            .filter(|container| !container.is_empty())
    }
}

/// Numeric quality key of a free-text label ("1080p60" -> 1080).
///
/// Saturates at `u32::MAX` for absurdly long digit runs.
pub fn quality_key(label: &str) -> u32 {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    digits.parse().unwrap_or(u32::MAX)
}

/// Response body of the extraction service, parsed permissively.
///
/// Format entries stay as raw JSON so that one malformed record cannot
/// fail the whole document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFormatDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub formats: Option<Vec<Value>>,
    #[serde(default, rename = "adaptiveFormats")]
    pub adaptive_formats: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawFormatDocument {
    /// Whether either format list is present at all
    pub fn has_format_lists(&self) -> bool {
        self.formats.is_some() || self.adaptive_formats.is_some()
    }

    /// Application-level error text, if the service set one.
    ///
    /// `null`, `false` and empty strings do not count as errors.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Progressive records followed by adaptive records
    pub fn records(&self) -> impl Iterator<Item = &Value> {
        self.formats
            .iter()
            .flatten()
            .chain(self.adaptive_formats.iter().flatten())
    }
}

/// A single format entry as the service sends it
///
/// Only `url` is strictly typed; a record whose url is not a string is
/// rejected as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "qualityLabel")]
    pub quality_label: Option<Value>,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<Value>,
    #[serde(default)]
    pub filesize: Option<Value>,
    #[serde(default, rename = "fileSize")]
    pub file_size: Option<Value>,
    #[serde(default, rename = "contentLength")]
    pub content_length: Option<Value>,
    #[serde(default)]
    pub itag: Option<Value>,
}

impl RawFormat {
    /// Size in bytes from whichever size field is usable
    pub fn size_bytes(&self) -> Option<u64> {
        [&self.filesize, &self.file_size, &self.content_length]
            .into_iter()
            .flatten()
            .find_map(lenient_u64)
    }

    pub fn quality_label(&self) -> Option<String> {
        self.quality_label.as_ref().and_then(lenient_string)
    }

    pub fn mime_type(&self) -> Option<String> {
        self.mime_type.as_ref().and_then(lenient_string)
    }

    pub fn itag(&self) -> Option<String> {
        self.itag.as_ref().and_then(lenient_string)
    }
}

/// Text fields may arrive as strings or bare numbers; anything else is ignored
fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accepts non-negative integers sent either as numbers or numeric strings
fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
