//! img2txt CLI - describe images with a vision-capable LLM.
//!
//! Each supported image is sent to OpenAI or Gemini together with the prompt
//! from the config file, and the returned description is saved as a `.txt`
//! file with the same name next to the image.
//!
//! # Usage
//!
//! ```bash
//! # Describe a single image
//! img2txt photos/beach.jpg
//!
//! # Describe every supported image in a folder
//! img2txt ./photos/
//!
//! # Pick the provider when both keys are configured
//! img2txt ./photos/ --provider gemini
//! ```

use clap::Parser;

mod cli;
mod logging;

/// img2txt - describe images with a vision-capable LLM.
#[derive(Parser, Debug)]
#[command(name = "img2txt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    #[command(flatten)]
    args: cli::describe::DescribeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage errors are printed and the run ends without a distinct exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(());
        }
    };

    // Logging isn't initialized yet, so config errors are reported after init.
    let config = cli::describe::load_config(&cli.args);
    match &config {
        Ok(config) => logging::init_from_config(&config.logging, cli.verbose, cli.json_logs),
        Err(_) => logging::init(if cli.verbose { "debug" } else { "info" }, cli.json_logs),
    }

    tracing::debug!("img2txt v{}", img2txt_core::VERSION);

    let result = match config {
        Ok(config) => cli::describe::execute(&cli.args, &config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::error!("{e:#}");
    }

    Ok(())
}
