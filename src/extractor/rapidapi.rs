//! Client for the RapidAPI-hosted stream extraction service
//!
//! Issues `GET {base_url}/dl?id=<video id>` with the host and key headers
//! and maps the outcome onto [`ResolveError`].

use crate::extractor::models::RawFormatDocument;
use crate::extractor::traits::FormatSource;
use crate::extractor::video_id::VideoReference;
use crate::utils::config::ServiceConfig;
use crate::utils::error::ResolveError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

pub const HOST_HEADER: &str = "x-rapidapi-host";
pub const KEY_HEADER: &str = "x-rapidapi-key";

/// HTTP client for the extraction service
pub struct RapidApiClient {
    client: Client,
    config: ServiceConfig,
}

impl RapidApiClient {
    /// Build the client from an already-validated configuration
    pub fn new(config: ServiceConfig) -> Result<Self, ResolveError> {
        if config.api_key.trim().is_empty() {
            return Err(ResolveError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ResolveError::Configuration(format!("HTTP client: {}", e)))?;

        info!("Extraction client ready for {}", config.api_host);
        Ok(Self { client, config })
    }

    /// Endpoint URL for one video
    pub fn endpoint(&self, reference: &VideoReference) -> String {
        format!("{}/dl?id={}", self.config.base_url, reference)
    }
}

#[async_trait]
impl FormatSource for RapidApiClient {
    fn id(&self) -> &'static str {
        "rapidapi-ytstream"
    }

    async fn fetch_formats(
        &self,
        reference: &VideoReference,
    ) -> Result<RawFormatDocument, ResolveError> {
        let url = self.endpoint(reference);
        debug!("Requesting formats from {}", url);

        let response = self
            .client
            .get(&url)
            .header(HOST_HEADER, &self.config.api_host)
            .header(KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Extraction service unreachable: {}", e);
                ResolveError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            ResolveError::from(e)
        })?;

        interpret_response(status, &body)
    }
}

/// Map a completed HTTP exchange onto a document or a domain error
pub fn interpret_response(status: StatusCode, body: &str) -> Result<RawFormatDocument, ResolveError> {
    if !status.is_success() {
        error!("Extraction service returned {}", status);
        return Err(ResolveError::Status(status.as_u16()));
    }

    let document: RawFormatDocument = serde_json::from_str(body).map_err(|e| {
        error!("Unreadable response body: {}", e);
        ResolveError::MalformedBody(e.to_string())
    })?;

    if let Some(message) = document.error_message() {
        warn!("Extraction service reported: {}", message);
        return Err(ResolveError::Application(message));
    }

    if !document.has_format_lists() {
        warn!("Response carries no format lists");
        return Err(ResolveError::MissingFormats);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_success_status() {
        let err = interpret_response(StatusCode::TOO_MANY_REQUESTS, "{}").unwrap_err();
        assert_eq!(err, ResolveError::Status(429));

        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "oops").unwrap_err();
        assert_eq!(err, ResolveError::Status(500));
    }

    #[test]
    fn test_application_error_on_ok_status() {
        let err = interpret_response(StatusCode::OK, r#"{"error":"quota exceeded"}"#).unwrap_err();
        assert_eq!(err, ResolveError::Application("quota exceeded".to_string()));
    }

    #[test]
    fn test_error_wins_over_formats() {
        let err = interpret_response(
            StatusCode::OK,
            r#"{"error":"bad id","formats":[{"url":"a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::Application(_)));
    }

    #[test]
    fn test_missing_format_lists() {
        let err = interpret_response(StatusCode::OK, r#"{"title":"x"}"#).unwrap_err();
        assert_eq!(err, ResolveError::MissingFormats);
    }

    #[test]
    fn test_not_json() {
        let err = interpret_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedBody(_)));
    }

    #[test]
    fn test_success() {
        let doc = interpret_response(
            StatusCode::OK,
            r#"{"title":"Song","adaptiveFormats":[{"url":"a","qualityLabel":"720p"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.title.as_deref(), Some("Song"));
        assert_eq!(doc.records().count(), 1);
    }

    #[test]
    fn test_endpoint() {
        let mut config = ServiceConfig::new("key");
        config.base_url = "http://127.0.0.1:8080".to_string();
        let client = RapidApiClient::new(config).unwrap();
        let reference = "dQw4w9WgXcQ".parse().unwrap();
        assert_eq!(
            client.endpoint(&reference),
            "http://127.0.0.1:8080/dl?id=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = RapidApiClient::new(ServiceConfig::new(" ")).err().unwrap();
        assert!(matches!(err, ResolveError::Configuration(_)));
    }
}
