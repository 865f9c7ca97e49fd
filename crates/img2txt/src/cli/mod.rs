//! Command-line handlers.

pub mod describe;
pub mod types;
