//! Image description pipeline components.
//!
//! - **discovery**: Resolve the input path into candidate files
//! - **filter**: Map file extensions to supported MIME types
//! - **processor**: Describe one file, and drive a whole batch sequentially

pub mod discovery;
pub mod filter;
pub mod processor;

// Re-exports for convenient access
pub use discovery::{resolve_input, InputKind, ResolvedInput};
pub use filter::mime_type_for;
pub use processor::{BatchSummary, Describer, FileOutcome};
