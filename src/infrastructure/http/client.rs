//! HTTP adapter for probing and downloading user-supplied URLs.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, trace};

use crate::domain::errors::{EditResult, ImageEditError};
use crate::domain::ports::ImageSourcePort;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("imagedit/", env!("CARGO_PKG_VERSION"));

/// Shared outbound connection pool.
///
/// Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl std::fmt::Debug for HttpImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageSource").finish_non_exhaustive()
    }
}

impl HttpImageSource {
    /// Creates the client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout_secs: u64, user_agent: &str) -> EditResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ImageEditError::HttpClient {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Creates the client with default settings.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_defaults() -> EditResult<Self> {
        Self::new(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    fn transport_error(url: &str, e: &reqwest::Error) -> ImageEditError {
        if e.is_timeout() {
            ImageEditError::fetch(url, "request timed out")
        } else if e.is_connect() {
            ImageEditError::fetch(url, "failed to connect")
        } else {
            ImageEditError::fetch(url, format!("request failed: {e}"))
        }
    }
}

#[async_trait]
impl ImageSourcePort for HttpImageSource {
    async fn probe(&self, url: &str) -> EditResult<Option<String>> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            return Err(ImageEditError::probe_refused(url));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        trace!(url = %url, status = %status, content_type = ?content_type, "Probed URL");

        Ok(content_type)
    }

    async fn fetch(&self, url: &str) -> EditResult<Bytes> {
        debug!(url = %url, "Downloading");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageEditError::fetch(
                url,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageEditError::fetch(url, format!("failed to read body: {e}")))?;

        debug!(url = %url, size = bytes.len(), "Downloaded");

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_probe_returns_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/cat.png"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
            .mount(&server)
            .await;

        let source = HttpImageSource::with_defaults().unwrap();
        let content_type = source
            .probe(&format!("{}/cat.png", server.uri()))
            .await
            .unwrap();

        assert_eq!(content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_probe_405_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;

        let source = HttpImageSource::with_defaults().unwrap();
        let result = source.probe(&format!("{}/x", server.uri())).await;

        assert!(matches!(result, Err(ImageEditError::ProbeRefused { .. })));
    }

    #[tokio::test]
    async fn test_probe_connection_error_is_fetch_error() {
        let source = HttpImageSource::new(2, DEFAULT_USER_AGENT).unwrap();
        let result = source.probe("http://127.0.0.1:1/x.png").await;

        assert!(matches!(result, Err(ImageEditError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let source = HttpImageSource::with_defaults().unwrap();
        let bytes = source
            .fetch(&format!("{}/a.jpg", server.uri()))
            .await
            .unwrap();

        assert_eq!(bytes.as_ref(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpImageSource::with_defaults().unwrap();
        let err = source
            .fetch(&format!("{}/gone.png", server.uri()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("HTTP 404: Not Found"));
    }
}
