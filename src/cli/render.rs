//! Plain-text rendering of pipeline state

use crate::backend::ResolutionState;
use crate::extractor::MediaFormat;
use crate::utils::format_bytes;
use std::fmt::Write;

/// One line of the format list, 1-based
pub fn render_format(index: usize, format: &MediaFormat) -> String {
    let mut line = format!("{:>3}. {:<14}", index, format.display_label());

    if let Some(container) = format.container() {
        let _ = write!(line, " {:<12}", container);
    }
    if let Some(size) = format.file_size_bytes {
        let _ = write!(line, " {:>10}", format_bytes(size));
    }
    if let Some(itag) = &format.itag {
        let _ = write!(line, "  itag {}", itag);
    }

    line.trim_end().to_string()
}

/// Full human-readable report for a state
pub fn render_state(state: &ResolutionState) -> String {
    match state {
        ResolutionState::Idle => "Paste a YouTube URL or video ID".to_string(),
        ResolutionState::Pending { reference } => format!("Processing {}...", reference),
        ResolutionState::Succeeded {
            reference,
            formats,
            title,
        } => {
            let mut out = String::new();
            if let Some(title) = title {
                let _ = writeln!(out, "{}", title);
            }
            let _ = writeln!(out, "Watch:     {}", reference.watch_url());
            let _ = writeln!(out, "Thumbnail: {}", reference.thumbnail_url());
            let _ = writeln!(out);
            let _ = writeln!(out, "Available Formats:");
            for (i, format) in formats.iter().enumerate() {
                let _ = writeln!(out, "{}", render_format(i + 1, format));
            }
            out
        }
        ResolutionState::Failed { message, .. } => format!("Error: {}", message),
    }
}
