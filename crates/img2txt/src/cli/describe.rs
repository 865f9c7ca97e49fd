//! Describing a file or directory of images.

use clap::Args;
use img2txt_core::{BatchSummary, Config, Img2Txt};
use std::path::PathBuf;

use super::types::ProviderArg;

/// Arguments for a describe run.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Image file or directory of images to describe
    pub path: PathBuf,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "IMG2TXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Provider to use when both are configured
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,
}

/// Load configuration from `--config` or the default location.
pub fn load_config(args: &DescribeArgs) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Execute a describe run.
///
/// Configuration and client setup happen before the input path is resolved,
/// so a bad setup never touches an image or the network.
pub async fn execute(args: &DescribeArgs, config: &Config) -> anyhow::Result<BatchSummary> {
    let run = config.resolve(args.provider.map(Into::into))?;
    tracing::info!("Using {} model {}", run.provider.display_name(), run.model_name);

    let img2txt = Img2Txt::new(run)?;
    let summary = img2txt.describe_path(&args.path).await?;

    tracing::info!(
        "Described {} image(s), {} with placeholder text, {} failed",
        summary.described,
        summary.placeholders,
        summary.failed
    );
    tracing::info!("Operation completed!");
    Ok(summary)
}
