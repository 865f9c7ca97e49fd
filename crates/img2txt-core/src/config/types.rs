//! Sub-configuration structs and the resolved per-run settings.

use serde::Deserialize;
use std::fmt;

/// Base URL used for Gemini when `geminiApiEndpoint` is not set.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The two supported description backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Chat Completions style (`messages` payload, bearer auth)
    OpenAi,
    /// Gemini `generateContent` style (`contents/parts` payload, key query parameter)
    Gemini,
}

impl ProviderKind {
    /// Human-readable provider name used in log messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log format: pretty or json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Fully validated settings for one run against one provider.
///
/// Produced by [`Config::resolve`](super::Config::resolve); immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Selected provider
    pub provider: ProviderKind,
    /// API key with `${ENV_VAR}` references already resolved
    pub api_key: String,
    /// Prompt sent alongside every image
    pub prompt: String,
    /// Model identifier
    pub model_name: String,
    /// Full Chat Completions URL for OpenAI, API base URL for Gemini
    pub endpoint: String,
}
