//! Gemini provider using the `generateContent` API.
//!
//! The image travels as an `inlineData` part next to the text prompt. There is
//! no auth header; the API key goes into the `key` query parameter of each request.

use super::provider::{read_reply, ImageInput, RawResponse, VisionProvider};
use crate::error::Img2TxtError;
use crate::pipeline::filter::{mime_type_for, GEMINI_FORMATS};
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

/// Gemini provider.
pub struct GeminiProvider {
    api_key: String,
    client: reqwest::Client,
    url: String,
}

impl GeminiProvider {
    /// `endpoint` is the API base, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub fn new(api_key: &str, model: &str, endpoint: &str) -> Result<Self, Img2TxtError> {
        Ok(Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::builder().build()?,
            url: generate_content_url(endpoint, model),
        })
    }
}

/// `{base}/models/{model}:generateContent`, without the key.
pub fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Blob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[async_trait]
impl VisionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn mime_type_for(&self, path: &Path) -> Option<&'static str> {
        mime_type_for(path, GEMINI_FORMATS)
    }

    fn build_request(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<serde_json::Value, serde_json::Error> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: &image.media_type,
                            data: &image.data,
                        },
                    },
                ],
            }],
        };
        serde_json::to_value(body)
    }

    async fn send(&self, body: &serde_json::Value) -> Result<RawResponse, reqwest::Error> {
        let resp = self
            .client
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await?;
        read_reply(resp).await
    }

    fn extract_text(&self, response: &serde_json::Value) -> Option<String> {
        response
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}
