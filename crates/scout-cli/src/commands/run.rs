//! Run command implementation.

use crate::cli::RunArgs;
use crate::commands::{classify_source, scrape_to_file};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::build_provider;
use scout_io::JsonFileSource;

/// Execute the full pipeline: scrape, classify, export.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    // Backend problems are fatal; surface them before scraping
    let provider = build_provider(config)?;

    let raw_speakers = scrape_to_file(args.url, config, formatter).await?;
    classify_source(&JsonFileSource::new(raw_speakers), provider, config, formatter).await?;

    Ok(())
}
