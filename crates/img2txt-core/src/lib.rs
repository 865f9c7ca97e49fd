//! img2txt Core - describe images with a vision-capable LLM.
//!
//! Every supported image under the input path is sent to a remote multimodal
//! API together with a fixed prompt, and the returned description is saved as a
//! `.txt` file next to the image.
//!
//! # Architecture
//!
//! ```text
//! Path → Resolve → Filter (MIME) → Build request → POST → Extract text → <stem>.txt
//! ```
//!
//! Files are processed strictly one at a time. A failure on one file is logged
//! and never stops the batch.
//!
//! # Usage
//!
//! ```rust,ignore
//! use img2txt_core::{Config, Img2Txt};
//!
//! #[tokio::main]
//! async fn main() -> img2txt_core::Result<()> {
//!     let run = Config::load()?.resolve(None)?;
//!     let img2txt = Img2Txt::new(run)?;
//!
//!     let summary = img2txt.describe_path("./photos".as_ref()).await?;
//!     println!("Described {} image(s)", summary.described);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod llm;
pub mod output;
pub mod pipeline;

// Re-exports for convenient access
pub use config::{Config, ProviderKind, RunConfiguration};
pub use error::{ConfigError, Img2TxtError, ProcessingError, ProcessingResult, Result};
pub use llm::{ProviderFactory, VisionProvider, PLACEHOLDER_DESCRIPTION};
pub use pipeline::{BatchSummary, Describer, FileOutcome, InputKind};

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entry point: one configured provider plus the fixed prompt.
pub struct Img2Txt {
    describer: Describer,
}

impl Img2Txt {
    /// Build the provider (and its HTTP client) from a resolved configuration.
    pub fn new(config: RunConfiguration) -> Result<Self> {
        let provider = ProviderFactory::create(&config)?;
        tracing::debug!(
            "Using {} model {} at {}",
            provider.name(),
            config.model_name,
            config.endpoint
        );
        Ok(Self {
            describer: Describer::new(provider, config.prompt),
        })
    }

    /// Describe a single image file or every supported image directly inside a directory.
    ///
    /// An invalid path fails before any image is read or any request is sent.
    pub async fn describe_path(&self, path: &Path) -> Result<BatchSummary> {
        let input = pipeline::resolve_input(path)?;
        match input.kind {
            InputKind::Directory => {
                tracing::info!("Processing all supported images in folder: {}", path.display())
            }
            InputKind::File => {
                tracing::info!("Processing single image file: {}", path.display())
            }
        }

        let summary = self.describer.run(&input.files).await;
        tracing::debug!(
            "{} of {} file(s) skipped as unsupported by {}",
            summary.skipped,
            summary.total(),
            self.describer.provider().name()
        );
        Ok(summary)
    }
}
