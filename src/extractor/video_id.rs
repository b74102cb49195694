//! Video identifier extraction from pasted user input
//!
//! Accepts watch links, short links, embed links and bare identifiers.
//! Anything else is rejected; extraction never fails loudly.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::ResolveError;

/// Length of a canonical video identifier
pub const VIDEO_ID_LEN: usize = 11;

lazy_static! {
    // Shapes are tried in this order; the first match wins.
    static ref URL_SHAPES: [Regex; 3] = [
        // youtube.com/watch?...v=<id>...
        Regex::new(
            r"^(?i:(?:https?://)?(?:www\.)?youtube\.com)/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]{11})(?:[&#]|$)"
        )
        .expect("watch pattern"),
        // youtu.be/<id>
        Regex::new(r"^(?i:(?:https?://)?(?:www\.)?youtu\.be)/([A-Za-z0-9_-]{11})(?:[?#/]|$)")
            .expect("short link pattern"),
        // youtube.com/embed/<id>
        Regex::new(
            r"^(?i:(?:https?://)?(?:www\.)?youtube\.com)/embed/([A-Za-z0-9_-]{11})(?:[?#/]|$)"
        )
        .expect("embed pattern"),
    ];
    static ref BARE_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("bare id pattern");
}

/// Canonical 11-character video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoReference(String);

impl VideoReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional thumbnail image for this video
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.0)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Player URL used for in-page preview
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses a bare identifier only; use [`extract`] for URLs.
impl FromStr for VideoReference {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if BARE_ID.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ResolveError::InvalidInput)
        }
    }
}

impl TryFrom<String> for VideoReference {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VideoReference> for String {
    fn from(reference: VideoReference) -> Self {
        reference.0
    }
}

/// Extract the video identifier from arbitrary user input.
///
/// Returns `None` when the input matches none of the recognized shapes.
pub fn extract(input: &str) -> Option<VideoReference> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for shape in URL_SHAPES.iter() {
        if let Some(caps) = shape.captures(input) {
            return caps.get(1).map(|m| VideoReference(m.as_str().to_string()));
        }
    }

    if BARE_ID.is_match(input) {
        return Some(VideoReference(input.to_string()));
    }

    None
}
