//! Utility modules for error handling, configuration and display

pub mod config;
pub mod display;
pub mod error;

// Re-export for convenience
pub use config::ServiceConfig;
pub use display::format_bytes;
pub use error::{FailureKind, ResolveError};
