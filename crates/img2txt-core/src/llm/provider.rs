//! Vision provider trait and request/response types.
//!
//! Defines the interface both description backends implement, plus the
//! factory that creates the right provider from the resolved configuration.

use crate::config::{ProviderKind, RunConfiguration};
use crate::error::Img2TxtError;
use async_trait::async_trait;
use base64::Engine;
use std::path::Path;

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes (standard alphabet, no line wrapping)
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Encode raw bytes with an already-known MIME type.
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Raw HTTP reply, before any JSON interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status, if known
    pub reason: String,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait that both description providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VisionProvider>` for dynamic dispatch).
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for log messages (e.g., "OpenAI", "Gemini").
    fn name(&self) -> &str;

    /// MIME type for a file this provider accepts, or `None` to skip it.
    fn mime_type_for(&self, path: &Path) -> Option<&'static str>;

    /// Build the JSON payload for one image. Pure: no I/O.
    fn build_request(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<serde_json::Value, serde_json::Error>;

    /// POST a payload with this provider's authentication applied.
    async fn send(&self, body: &serde_json::Value) -> Result<RawResponse, reqwest::Error>;

    /// Navigate a successful response to the generated text.
    fn extract_text(&self, response: &serde_json::Value) -> Option<String>;
}

/// Factory that creates the provider selected by the configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the provider and its long-lived HTTP client.
    pub fn create(config: &RunConfiguration) -> Result<Box<dyn VisionProvider>, Img2TxtError> {
        match config.provider {
            ProviderKind::OpenAi => Ok(Box::new(super::openai::OpenAiProvider::new(
                &config.api_key,
                &config.model_name,
                &config.endpoint,
            )?)),
            ProviderKind::Gemini => Ok(Box::new(super::gemini::GeminiProvider::new(
                &config.api_key,
                &config.model_name,
                &config.endpoint,
            )?)),
        }
    }
}

pub(crate) async fn read_reply(resp: reqwest::Response) -> Result<RawResponse, reqwest::Error> {
    let status = resp.status();
    let body = resp.text().await?;
    Ok(RawResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        body,
    })
}
