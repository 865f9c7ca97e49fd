//! Per-file processing and the sequential batch driver.

use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, ProcessingResult};
use crate::llm::extract::extract_description;
use crate::llm::provider::{ImageInput, VisionProvider};
use crate::output::write_description;

/// What happened to one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Extension not supported by the provider; nothing was read or written
    Skipped,
    /// A description file was written
    Described {
        /// Path of the written `.txt` file
        output: PathBuf,
        /// True when the placeholder text was written
        placeholder: bool,
    },
}

/// Counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files with a generated description
    pub described: usize,
    /// Files written with the placeholder text
    pub placeholders: usize,
    /// Unsupported files
    pub skipped: usize,
    /// Files abandoned after an error
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.described + self.placeholders + self.skipped + self.failed
    }

    fn record(&mut self, result: &ProcessingResult<FileOutcome>) {
        match result {
            Ok(FileOutcome::Skipped) => self.skipped += 1,
            Ok(FileOutcome::Described {
                placeholder: true, ..
            }) => self.placeholders += 1,
            Ok(FileOutcome::Described { .. }) => self.described += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Sends images to a provider and saves the returned descriptions.
pub struct Describer {
    provider: Box<dyn VisionProvider>,
    prompt: String,
}

impl Describer {
    pub fn new(provider: Box<dyn VisionProvider>, prompt: impl Into<String>) -> Self {
        Self {
            provider,
            prompt: prompt.into(),
        }
    }

    /// The provider this describer sends requests to.
    pub fn provider(&self) -> &dyn VisionProvider {
        self.provider.as_ref()
    }

    /// Describe one file.
    ///
    /// Unsupported extensions return [`FileOutcome::Skipped`] without touching
    /// the file. Every other failure comes back as a [`ProcessingError`].
    pub async fn process_file(&self, path: &Path) -> ProcessingResult<FileOutcome> {
        let Some(mime_type) = self.provider.mime_type_for(path) else {
            return Ok(FileOutcome::Skipped);
        };

        tracing::info!(
            "Processing: {}",
            path.file_name().unwrap_or(path.as_os_str()).to_string_lossy()
        );

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ProcessingError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let image = ImageInput::from_bytes(&bytes, mime_type);

        let body = self
            .provider
            .build_request(&image, &self.prompt)
            .map_err(|e| ProcessingError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let reply = self
            .provider
            .send(&body)
            .await
            .map_err(|e| ProcessingError::Transport {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!("{} replied {} for {:?}", self.provider.name(), reply.status, path);

        let description = extract_description(self.provider.as_ref(), path, &reply)?;
        let output = write_description(path, &description.text).await?;
        tracing::info!("Description saved to: {}", output.display());

        Ok(FileOutcome::Described {
            output,
            placeholder: description.placeholder,
        })
    }

    /// Process files strictly one after another. Never aborts: each failure
    /// is logged with its file path and the batch moves on.
    pub async fn run(&self, files: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for file in files {
            let result = self.process_file(file).await;
            if let Err(e) = &result {
                tracing::error!("{e}");
            }
            summary.record(&result);
        }

        summary
    }
}
