//! streamgrab library
//!
//! Resolves a pasted YouTube link or video ID into a ranked list of
//! downloadable formats using a third-party extraction service.

pub mod backend;
pub mod cli;
pub mod extractor;
pub mod utils;

// Re-export main types for easier use
pub use backend::{ResolutionController, ResolutionState};
pub use extractor::{extract, normalize, FormatSource, MediaFormat, RapidApiClient, VideoReference};
pub use utils::{FailureKind, ResolveError, ServiceConfig};
