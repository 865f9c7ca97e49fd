//! Extension-based image type detection.
//!
//! Only the filename suffix is inspected; file contents are never sniffed.

use std::path::Path;

/// Extension to MIME type table for chat-completion style providers.
pub const OPENAI_FORMATS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// Extension to MIME type table for Gemini.
pub const GEMINI_FORMATS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

/// Look up the MIME type for `path` in `formats`, ignoring extension case.
///
/// Returns `None` for unsupported or missing extensions.
pub fn mime_type_for(path: &Path, formats: &[(&str, &'static str)]) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    formats
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
}
