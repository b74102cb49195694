//! Error handling for streamgrab

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for a resolution attempt.
///
/// `Display` carries diagnostic detail meant for logs. The presentation
/// layer only ever sees [`ResolveError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("input does not contain a video identifier")]
    InvalidInput,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("service responded with HTTP status {0}")]
    Status(u16),

    #[error("service reported an error: {0}")]
    Application(String),

    #[error("response carries neither formats nor adaptiveFormats")]
    MissingFormats,

    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("no format record with a usable url")]
    NoFormats,

    #[error("fetch task did not complete: {0}")]
    TaskFailed(String),
}

/// Coarse failure classification exposed through `ResolutionState::Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidInput,
    Configuration,
    Transport,
    Application,
    NoFormats,
}

impl ResolveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::InvalidInput => FailureKind::InvalidInput,
            ResolveError::Configuration(_) => FailureKind::Configuration,
            ResolveError::Transport(_)
            | ResolveError::Status(_)
            | ResolveError::TaskFailed(_) => FailureKind::Transport,
            ResolveError::Application(_)
            | ResolveError::MissingFormats
            | ResolveError::MalformedBody(_) => FailureKind::Application,
            ResolveError::NoFormats => FailureKind::NoFormats,
        }
    }

    /// Fixed human-readable message, free of internal detail
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::InvalidInput => "invalid input",
            ResolveError::Configuration(_) => "service is not configured",
            ResolveError::Transport(_)
            | ResolveError::Status(_)
            | ResolveError::TaskFailed(_) => "Error fetching download links.",
            ResolveError::Application(_) => "The extraction service reported an error.",
            ResolveError::MissingFormats => "No download links found.",
            ResolveError::MalformedBody(_) => {
                "The extraction service returned an unreadable response."
            }
            ResolveError::NoFormats => "No usable download links found.",
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Transport(err.to_string())
    }
}
