//! Turning a raw provider reply into description text.

use super::provider::{RawResponse, VisionProvider};
use crate::error::{ProcessingError, ProcessingResult};
use std::path::Path;

/// Written in place of a description when a successful reply carries no text.
pub const PLACEHOLDER_DESCRIPTION: &str = "Description not generated or found.";

/// Text extracted from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Generated text, or [`PLACEHOLDER_DESCRIPTION`]
    pub text: String,
    /// True when the reply had no usable text
    pub placeholder: bool,
}

/// Interpret a raw reply for the image at `path`.
///
/// Failure statuses and API-level `error` objects abandon the file. A
/// well-formed reply without text degrades to the placeholder.
pub fn extract_description(
    provider: &dyn VisionProvider,
    path: &Path,
    reply: &RawResponse,
) -> ProcessingResult<Description> {
    if !reply.is_success() {
        tracing::warn!("Response: {}", reply.body);
        let api_message = serde_json::from_str::<serde_json::Value>(&reply.body)
            .ok()
            .as_ref()
            .and_then(error_message);
        return Err(ProcessingError::HttpStatus {
            path: path.to_path_buf(),
            provider: provider.name().to_string(),
            status: reply.status,
            reason: reply.reason.clone(),
            body: reply.body.clone(),
            api_message,
        });
    }

    let json: serde_json::Value =
        serde_json::from_str(&reply.body).map_err(|e| ProcessingError::Json {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
        let message = error_message(&json).unwrap_or_else(|| error.to_string());
        return Err(ProcessingError::Api {
            path: path.to_path_buf(),
            provider: provider.name().to_string(),
            message,
        });
    }

    match provider.extract_text(&json).filter(|t| !t.is_empty()) {
        Some(text) => Ok(Description {
            text,
            placeholder: false,
        }),
        None => {
            tracing::warn!(
                "Could not extract description from {} response for {:?}. It might be empty or blocked.",
                provider.name(),
                path
            );
            tracing::warn!("Full Response: {}", reply.body);
            Ok(Description {
                text: PLACEHOLDER_DESCRIPTION.to_string(),
                placeholder: true,
            })
        }
    }
}

/// `error.message` from an error envelope, if present.
fn error_message(json: &serde_json::Value) -> Option<String> {
    json.pointer("/error/message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
