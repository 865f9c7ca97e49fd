//! Input path resolution.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Img2TxtError, Result};

/// What kind of path the user passed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single regular file
    File,
    /// A directory; only its direct children are candidates
    Directory,
}

/// The ordered set of candidate files for one run.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// Kind of the input path
    pub kind: InputKind,
    /// Candidate files, in filesystem order, not yet filtered by type
    pub files: Vec<PathBuf>,
}

/// Resolve a file or directory path into candidate files.
///
/// Directories are listed one level deep without sorting; subdirectories are
/// ignored. Anything that is neither a file nor a directory is run-fatal.
pub fn resolve_input(path: &Path) -> Result<ResolvedInput> {
    if path.is_dir() {
        let files = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {e}", path);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();

        Ok(ResolvedInput {
            kind: InputKind::Directory,
            files,
        })
    } else if path.is_file() {
        Ok(ResolvedInput {
            kind: InputKind::File,
            files: vec![path.to_path_buf()],
        })
    } else {
        Err(Img2TxtError::InvalidPath(path.to_path_buf()))
    }
}
