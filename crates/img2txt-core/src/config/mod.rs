//! Configuration management for img2txt.
//!
//! Configuration is a flat TOML file (`openAIKey`, `prompt`, `geminiModelName`, ...)
//! with an optional `[logging]` table. Any value may reference an environment
//! variable with `${VAR}` syntax.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for img2txt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenAI API key (supports ${ENV_VAR} syntax)
    #[serde(rename = "openAIKey")]
    pub openai_key: String,

    /// OpenAI model name, e.g. "gpt-4o"
    #[serde(rename = "openAIModelName")]
    pub openai_model_name: String,

    /// Full Chat Completions URL
    #[serde(rename = "openAIApiEndpoint")]
    pub openai_api_endpoint: String,

    /// Gemini API key (supports ${ENV_VAR} syntax)
    #[serde(rename = "geminiKey")]
    pub gemini_key: String,

    /// Gemini model name, e.g. "gemini-2.0-flash"
    #[serde(rename = "geminiModelName")]
    pub gemini_model_name: String,

    /// Gemini API base URL (defaults to the public v1beta endpoint)
    #[serde(rename = "geminiApiEndpoint")]
    pub gemini_api_endpoint: Option<String>,

    /// Prompt sent with every image
    pub prompt: String,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns an empty configuration if the file doesn't exist; resolving it
    /// will then report every missing key.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("No config file at {:?}", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path (`~` is expanded).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_tilde(path);
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.img2txt.img2txt/config.toml
    /// - Linux: ~/.config/img2txt/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\img2txt\config\config.toml
    ///
    /// Falls back to ~/.img2txt/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "img2txt", "img2txt")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".img2txt").join("config.toml")
            })
    }

    /// Gemini base URL, falling back to [`DEFAULT_GEMINI_ENDPOINT`].
    pub fn gemini_endpoint(&self) -> String {
        self.gemini_api_endpoint
            .as_deref()
            .and_then(resolve_env_var)
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string())
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
///
/// Returns `None` for empty strings and unset variables, so both count as missing.
pub fn resolve_env_var(value: &str) -> Option<String> {
    let value = value.trim();
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}
