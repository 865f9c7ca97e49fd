//! LLM integration for image description generation.
//!
//! Provides a provider abstraction over the two supported backends (OpenAI
//! Chat Completions and Gemini `generateContent`) and the shared logic that
//! turns a raw reply into description text.

pub mod extract;
pub(crate) mod gemini;
pub(crate) mod openai;
pub mod provider;

pub use extract::{extract_description, Description, PLACEHOLDER_DESCRIPTION};
pub use provider::{ImageInput, ProviderFactory, RawResponse, VisionProvider};
