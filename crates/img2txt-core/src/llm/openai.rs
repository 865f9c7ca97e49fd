//! OpenAI provider using the Chat Completions API.
//!
//! Sends the image as a data URL in the user message content array. The bearer
//! token is installed once as a default header on the shared client.

use super::provider::{read_reply, ImageInput, RawResponse, VisionProvider};
use crate::error::{ConfigError, Img2TxtError};
use crate::pipeline::filter::{mime_type_for, OPENAI_FORMATS};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use std::path::Path;

/// Upper bound on generated tokens per description.
const MAX_TOKENS: u32 = 500;

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    model: String,
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, endpoint: &str) -> Result<Self, Img2TxtError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
            ConfigError::ValidationError(
                "openAIKey contains characters that are not valid in an HTTP header".into(),
            )
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            model: model.to_string(),
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ChatContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent<'a> {
    #[serde(rename = "text")]
    Text { text: &'a str },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[async_trait]
impl VisionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn mime_type_for(&self, path: &Path) -> Option<&'static str> {
        mime_type_for(path, OPENAI_FORMATS)
    }

    fn build_request(
        &self,
        image: &ImageInput,
        prompt: &str,
    ) -> Result<serde_json::Value, serde_json::Error> {
        let body = ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ChatContent::Text { text: prompt },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
        };
        serde_json::to_value(body)
    }

    async fn send(&self, body: &serde_json::Value) -> Result<RawResponse, reqwest::Error> {
        let resp = self.client.post(&self.endpoint).json(body).send().await?;
        read_reply(resp).await
    }

    fn extract_text(&self, response: &serde_json::Value) -> Option<String> {
        response
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}
