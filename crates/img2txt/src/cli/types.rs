//! CLI enum types.

use clap::ValueEnum;
use img2txt_core::ProviderKind;

/// Supported description providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// OpenAI Chat Completions (or any compatible endpoint)
    Openai,
    /// Google Gemini generateContent
    Gemini,
}

impl std::fmt::Display for ProviderArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderArg::Openai => write!(f, "openai"),
            ProviderArg::Gemini => write!(f, "gemini"),
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Gemini => ProviderKind::Gemini,
        }
    }
}
