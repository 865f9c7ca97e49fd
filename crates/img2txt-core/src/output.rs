//! Writing descriptions next to their images.

use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, ProcessingResult};

/// `<dir>/<stem>.txt` for an image path.
///
/// A path without a directory component resolves to the current working
/// directory, with a warning.
pub fn output_path_for(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{stem}.txt");

    match image_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir.join(file_name),
        None => {
            tracing::warn!(
                "Could not determine output directory for {:?}. Saving in current directory.",
                image_path
            );
            PathBuf::from(file_name)
        }
    }
}

/// Write the trimmed description for `image_path`, replacing any existing file.
///
/// Returns the path written.
pub async fn write_description(image_path: &Path, text: &str) -> ProcessingResult<PathBuf> {
    let output_path = output_path_for(image_path);
    tokio::fs::write(&output_path, text.trim())
        .await
        .map_err(|source| ProcessingError::Write {
            path: image_path.to_path_buf(),
            output: output_path.clone(),
            source,
        })?;
    Ok(output_path)
}
