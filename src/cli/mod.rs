//! Terminal front-end: reads input, drives the controller, shows results

pub mod render;

use crate::backend::{ResolutionController, ResolutionState};
use anyhow::{anyhow, bail, Context, Result};
use arboard::Clipboard;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use render::{render_format, render_state};

/// Where the text to resolve comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Argument(String),
    Clipboard,
    Stdin,
}

impl InputSource {
    pub fn select(argument: Option<String>, from_clipboard: bool) -> Self {
        match argument {
            Some(text) => InputSource::Argument(text),
            None if from_clipboard => InputSource::Clipboard,
            None => InputSource::Stdin,
        }
    }
}

/// Text currently on the system clipboard
pub fn read_clipboard() -> Result<String> {
    let text = Clipboard::new()
        .context("Failed to access clipboard")?
        .get_text()
        .context("Failed to read clipboard")?;

    if text.trim().is_empty() {
        bail!("Clipboard is empty");
    }
    Ok(text)
}

/// What to do with a successful result
#[derive(Debug, Clone, Default)]
pub struct Actions {
    pub json: bool,
    pub preview: bool,
    /// 1-based index of the format to open
    pub open: Option<usize>,
}

/// Resolve one input and wait for its outcome
pub async fn resolve_once(
    controller: &ResolutionController,
    updates: &mut mpsc::UnboundedReceiver<ResolutionState>,
    input: &str,
) -> Result<ResolutionState> {
    let _ = controller.resolve(input);
    wait_for_outcome(updates).await
}

/// Skip intermediate states until a terminal one arrives
pub async fn wait_for_outcome(
    updates: &mut mpsc::UnboundedReceiver<ResolutionState>,
) -> Result<ResolutionState> {
    while let Some(state) = updates.recv().await {
        if state.is_terminal() {
            return Ok(state);
        }
        eprintln!("{}", render_state(&state));
    }
    Err(anyhow!("controller stopped publishing state"))
}

/// Print a terminal state and run the requested actions.
///
/// Preview runs before download when both are requested.
pub fn present(state: &ResolutionState, actions: &Actions) -> Result<()> {
    if actions.json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", render_state(state));
    }

    let ResolutionState::Succeeded {
        reference, formats, ..
    } = state
    else {
        return Ok(());
    };

    if actions.preview {
        info!("Opening preview for {}", reference);
        open::that(reference.embed_url()).context("Failed to open preview")?;
    }

    if let Some(index) = actions.open {
        let format = index
            .checked_sub(1)
            .and_then(|i| formats.get(i))
            .ok_or_else(|| anyhow!("No format #{} (have {})", index, formats.len()))?;
        debug!("Opening format #{} at {}", index, format.url);
        open::that(&format.url).context("Failed to open download link")?;
    }

    Ok(())
}
