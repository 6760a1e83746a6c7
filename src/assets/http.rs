//! HTTP image loader.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::trace;

use super::ImageLoader;
use crate::{Error, Result};

/// Downloads card images over HTTP(S).
///
/// Relative URLs (the bundled placeholder image) are considered ready
/// without a request. A response only counts as an image when its
/// `Content-Type` is `image/*`.
#[derive(Clone, Debug, Default)]
pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    /// Create a loader with a fresh client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Whether a URL must be fetched rather than served from bundled assets.
#[must_use]
pub fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether a `Content-Type` header value names an image.
#[must_use]
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("image/"))
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<()> {
        if !is_remote(url) {
            return Ok(());
        }

        let unavailable = |cause: String| Error::AssetUnavailable {
            url: url.to_string(),
            cause,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?;

        let content_type = response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        if !is_image_content_type(content_type) {
            return Err(unavailable(format!(
                "not an image (content type {})",
                content_type.unwrap_or("missing")
            )));
        }

        let bytes = response.bytes().await.map_err(|e| unavailable(e.to_string()))?;

        trace!(url, bytes = bytes.len(), "image loaded");
        Ok(())
    }
}
