//! Format normalization and ranking
//!
//! Turns the loosely-typed service response into an ordered list of
//! [`MediaFormat`]s: records without a url are dropped, duplicates are
//! collapsed and the rest is sorted best quality first.

use crate::extractor::models::{MediaFormat, RawFormat, RawFormatDocument};
use crate::utils::error::ResolveError;
use std::collections::HashSet;
use tracing::debug;

/// Merge, validate and rank the formats of a document.
///
/// Fails with [`ResolveError::NoFormats`] when no usable record remains.
pub fn normalize(document: &RawFormatDocument) -> Result<Vec<MediaFormat>, ResolveError> {
    let mut seen = HashSet::new();
    let mut formats = Vec::new();

    for (index, value) in document.records().enumerate() {
        let raw: RawFormat = match serde_json::from_value(value.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Skipping malformed format record #{}: {}", index, e);
                continue;
            }
        };

        if let Some(format) = validate(raw) {
            if seen.insert(format.url.clone()) {
                formats.push(format);
            }
        }
    }

    rank(&mut formats);

    if formats.is_empty() {
        return Err(ResolveError::NoFormats);
    }

    debug!("Normalized {} format(s)", formats.len());
    Ok(formats)
}

/// Sort best quality first. Stable, so ties keep their input order.
pub fn rank(formats: &mut [MediaFormat]) {
    formats.sort_by(|a, b| b.quality_key().cmp(&a.quality_key()));
}

fn validate(raw: RawFormat) -> Option<MediaFormat> {
    let url = raw.url.as_deref().filter(|url| !url.trim().is_empty())?;

    Some(MediaFormat {
        url: url.to_string(),
        quality_label: raw.quality_label(),
        mime_type: raw.mime_type(),
        file_size_bytes: raw.size_bytes(),
        itag: raw.itag(),
    })
}
