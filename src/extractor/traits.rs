use crate::extractor::models::RawFormatDocument;
use crate::extractor::video_id::VideoReference;
use crate::utils::error::ResolveError;
use async_trait::async_trait;

/// Source of raw format documents
///
/// This trait isolates the controller from the concrete extraction
/// service, so tests can substitute a fake transport.
#[async_trait]
pub trait FormatSource: Send + Sync {
    /// Returns a unique identifier for this source (e.g., "rapidapi-ytstream")
    fn id(&self) -> &'static str;

    /// Fetches the candidate formats for a video.
    ///
    /// One call is one outbound request: no retries and no caching.
    async fn fetch_formats(
        &self,
        reference: &VideoReference,
    ) -> Result<RawFormatDocument, ResolveError>;
}
