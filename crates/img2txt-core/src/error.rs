//! Error types for the img2txt pipeline.
//!
//! Two severity classes exist. [`Img2TxtError`] aborts the whole run before any
//! image is touched; [`ProcessingError`] belongs to a single file and is logged
//! by the batch driver, which then moves on to the next file.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Run-fatal errors.
#[derive(Error, Debug)]
pub enum Img2TxtError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input argument is neither a file nor a directory
    #[error("The path '{}' is not a valid file or directory", .0.display())]
    InvalidPath(PathBuf),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are missing or invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file errors. Every variant names the offending file.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// The image could not be read from disk
    #[error("File error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The request payload could not be serialized
    #[error("Failed to build request for {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    /// The request never produced an HTTP response
    #[error("Network error processing {}: {message}", .path.display())]
    Transport { path: PathBuf, message: String },

    /// The API answered with a non-success status code
    #[error(
        "Error calling {provider} API for {}: {status} {reason}{}",
        .path.display(),
        .api_message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
    )]
    HttpStatus {
        path: PathBuf,
        provider: String,
        status: u16,
        reason: String,
        body: String,
        api_message: Option<String>,
    },

    /// The API answered with success but reported an `error` object
    #[error("{provider} API error for {}: {message}", .path.display())]
    Api {
        path: PathBuf,
        provider: String,
        message: String,
    },

    /// The response body was not valid JSON
    #[error("Error parsing JSON response for {}: {message}", .path.display())]
    Json { path: PathBuf, message: String },

    /// The description file could not be written
    #[error(
        "File error saving description for {} to {}: {source}",
        .path.display(),
        .output.display()
    )]
    Write {
        path: PathBuf,
        output: PathBuf,
        source: std::io::Error,
    },
}

impl ProcessingError {
    /// The image file this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Encode { path, .. }
            | Self::Transport { path, .. }
            | Self::HttpStatus { path, .. }
            | Self::Api { path, .. }
            | Self::Json { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Convenience type alias for run-level results.
pub type Result<T> = std::result::Result<T, Img2TxtError>;

/// Convenience type alias for per-file results.
pub type ProcessingResult<T> = std::result::Result<T, ProcessingError>;
