//! Client for the external image host behind `POST /uploads`.
//!
//! The browser never talks to the image host directly; the API key stays on
//! the server. Uploads are sent as a multipart form:
//!
//! ```text
//! image = <file bytes>
//! key   = <IMAGE_HOST_API_KEY>   (when configured)
//! ```
//!
//! and the host answers with `{ "data": { "url": ... } }` or `{ "url": ... }`.

use std::time::Duration;

use serde::Deserialize;

use crate::config::ImageHostConfig;

/// Upper bound on one upload round trip.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the image host layer.
#[derive(Debug, thiserror::Error)]
pub enum ImageHostError {
    /// Uploads are disabled because no host is configured.
    #[error("Image host is not configured (set IMAGE_HOST_UPLOAD_URL)")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host returned a non-2xx status code.
    #[error("Image host error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response without a usable URL.
    #[error("Image host response had no URL: {0}")]
    MissingUrl(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: Option<UploadData>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
    display_url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Option<String> {
        self.data
            .and_then(|d| d.url.or(d.display_url))
            .or(self.url)
            .filter(|u| !u.trim().is_empty())
    }
}

/// HTTP client for the configured image host.
#[derive(Debug, Clone)]
pub struct ImageHostClient {
    client: reqwest::Client,
    config: ImageHostConfig,
}

impl ImageHostClient {
    pub fn new(config: ImageHostConfig) -> Result<Self, ImageHostError> {
        let client = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Upload one image and return its public URL.
    pub async fn upload(
        &self,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ImageHostError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime)?;
        let mut form = reqwest::multipart::Form::new().part("image", part);
        if let Some(key) = &self.config.api_key {
            form = form.text("key", key.clone());
        }

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
            return Err(ImageHostError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: UploadResponse =
            serde_json::from_str(&text).map_err(|_| ImageHostError::MissingUrl(text.clone()))?;
        parsed.into_url().ok_or(ImageHostError::MissingUrl(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<UploadResponse>(json).unwrap().into_url()
    }

    #[test]
    fn url_from_nested_data() {
        assert_eq!(
            parse(r#"{"data":{"url":"https://i.example.com/a.jpg"},"success":true}"#),
            Some("https://i.example.com/a.jpg".into())
        );
        assert_eq!(
            parse(r#"{"data":{"display_url":"https://i.example.com/b.jpg"}}"#),
            Some("https://i.example.com/b.jpg".into())
        );
    }

    #[test]
    fn url_from_top_level() {
        assert_eq!(
            parse(r#"{"url":"https://cdn.example.com/c.png"}"#),
            Some("https://cdn.example.com/c.png".into())
        );
    }

    #[test]
    fn missing_or_blank_url() {
        assert_eq!(parse(r#"{"data":{}}"#), None);
        assert_eq!(parse(r#"{"url":"  "}"#), None);
    }
}
