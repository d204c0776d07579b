//! Scrape command implementation.

use crate::cli::ScrapeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use scout_io::{save_raw_speakers, ConferenceScraper, SpeakerSource};
use std::path::PathBuf;

/// Execute the scrape command.
pub async fn execute_scrape(args: ScrapeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    scrape_to_file(args.url, config, formatter).await?;
    Ok(())
}

/// Scrape the speaker page and save the raw speakers JSON.
///
/// Returns the path written. An empty page is an error.
pub async fn scrape_to_file(
    url: Option<String>,
    config: &Config,
    formatter: &Formatter,
) -> Result<PathBuf> {
    let url = url.unwrap_or_else(|| config.paths.speakers_url.clone());
    let scraper = ConferenceScraper::new(url)?;

    println!("{}", formatter.info(&format!("Scraping speakers from {}", scraper.describe())));
    let speakers = scraper.fetch().await?;
    if speakers.is_empty() {
        return Err(CliError::NoSpeakers(scraper.describe()));
    }

    let path = config.raw_speakers_path();
    save_raw_speakers(&path, &speakers)?;
    println!(
        "{}",
        formatter.success(&format!("{} speakers saved to {}", speakers.len(), path.display()))
    );

    Ok(path)
}
