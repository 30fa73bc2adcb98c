//! Port definition for remote image sources.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::EditResult;

/// Port for probing and downloading user-supplied URLs.
/// Implementations must be thread-safe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSourcePort: Send + Sync {
    /// Issues a metadata-only request and returns the advertised content type.
    ///
    /// Returns `Ok(None)` when the response carries no content type and
    /// `ImageEditError::ProbeRefused` when the remote rejects the method.
    async fn probe(&self, url: &str) -> EditResult<Option<String>>;

    /// Downloads the full body.
    async fn fetch(&self, url: &str) -> EditResult<Bytes>;
}
