use crate::extractor::{MediaFormat, VideoReference};
use crate::utils::error::{FailureKind, ResolveError};
use serde::Serialize;

/// Observable state of the resolution pipeline
///
/// Entering `Pending` clears the previous terminal data; observers only
/// ever see the reference currently being resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionState {
    #[default]
    Idle,
    Pending {
        reference: VideoReference,
    },
    Succeeded {
        reference: VideoReference,
        formats: Vec<MediaFormat>,
        title: Option<String>,
    },
    Failed {
        reference: Option<VideoReference>,
        kind: FailureKind,
        message: String,
    },
}

impl ResolutionState {
    /// Failure state carrying only the user-facing message of `error`
    pub fn failed(reference: Option<VideoReference>, error: &ResolveError) -> Self {
        ResolutionState::Failed {
            reference,
            kind: error.kind(),
            message: error.user_message().to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResolutionState::Succeeded { .. } | ResolutionState::Failed { .. }
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResolutionState::Pending { .. })
    }

    pub fn reference(&self) -> Option<&VideoReference> {
        match self {
            ResolutionState::Idle => None,
            ResolutionState::Pending { reference } => Some(reference),
            ResolutionState::Succeeded { reference, .. } => Some(reference),
            ResolutionState::Failed { reference, .. } => reference.as_ref(),
        }
    }

    /// Short status name ("idle", "loading", "success", "error")
    pub fn label(&self) -> &'static str {
        match self {
            ResolutionState::Idle => "idle",
            ResolutionState::Pending { .. } => "loading",
            ResolutionState::Succeeded { .. } => "success",
            ResolutionState::Failed { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_uses_user_message() {
        let state = ResolutionState::failed(None, &ResolveError::Application("secret".into()));
        match state {
            ResolutionState::Failed { kind, message, .. } => {
                assert_eq!(kind, FailureKind::Application);
                assert!(!message.contains("secret"));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_labels_and_terminality() {
        let reference: VideoReference = "dQw4w9WgXcQ".parse().unwrap();
        let pending = ResolutionState::Pending {
            reference: reference.clone(),
        };
        assert_eq!(ResolutionState::default().label(), "idle");
        assert!(!ResolutionState::Idle.is_terminal());
        assert!(pending.is_pending());
        assert!(!pending.is_terminal());
        assert_eq!(pending.reference(), Some(&reference));

        let failed = ResolutionState::failed(Some(reference), &ResolveError::NoFormats);
        assert!(failed.is_terminal());
        assert_eq!(failed.label(), "error");
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let state = ResolutionState::failed(None, &ResolveError::InvalidInput);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "invalid input");
        assert_eq!(json["kind"], "InvalidInput");
    }
}
