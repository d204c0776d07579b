//! Speakerscout CLI - scrape conference speakers, classify them, export emails.

use clap::Parser;
use scout_cli::commands;
use scout_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Global .env first, then the working directory's; neither overrides the real environment
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".speakerscout/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> scout_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli)?;

    let formatter = Formatter::new(config.settings.color);

    match cli.command {
        None => commands::execute_run(Default::default(), &config, &formatter).await?,
        Some(Command::Run(args)) => commands::execute_run(args, &config, &formatter).await?,
        Some(Command::Scrape(args)) => commands::execute_scrape(args, &config, &formatter).await?,
        Some(Command::Classify(args)) => {
            commands::execute_classify(args, &config, &formatter).await?
        }
    }

    Ok(())
}
