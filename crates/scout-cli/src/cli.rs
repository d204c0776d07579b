//! CLI command definitions and argument parsing.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Speakerscout - Classify conference speakers and draft outbound emails.
#[derive(Debug, Parser)]
#[command(name = "speakerscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for raw_speakers.json and email_list.csv
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Log every classification retry
    #[arg(long, global = true, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// Show progress logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Backend and throughput overrides.
#[derive(Debug, Default, Args)]
pub struct LlmArgs {
    /// Model used for classification
    #[arg(long, global = true, env = "CLASSIFICATION_MODEL")]
    pub model: Option<String>,

    /// Backend kind
    #[arg(long, global = true, value_enum, env = "LLM_PROVIDER")]
    pub provider: Option<ProviderKind>,

    /// Backend base URL
    #[arg(long, global = true, env = "LLM_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Maximum classifications in flight
    #[arg(long, global = true, env = "MAX_CONCURRENT_REQUESTS")]
    pub max_concurrent: Option<usize>,

    /// Courtesy delay before each classification, in seconds
    #[arg(long, global = true, env = "REQUEST_DELAY_SECONDS")]
    pub request_delay: Option<f64>,
}

/// Supported backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    #[default]
    #[value(name = "openai")]
    OpenAi,
    /// Local Ollama server
    Ollama,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape, classify and export (default)
    Run(RunArgs),

    /// Scrape the speaker page and save raw_speakers.json
    Scrape(ScrapeArgs),

    /// Classify speakers from a JSON file and export the CSV
    Classify(ClassifyArgs),
}

/// Arguments for the run command.
#[derive(Debug, Default, Parser)]
pub struct RunArgs {
    /// Speaker listing URL
    #[arg(short, long)]
    pub url: Option<String>,
}

/// Arguments for the scrape command.
#[derive(Debug, Parser)]
pub struct ScrapeArgs {
    /// Speaker listing URL
    #[arg(short, long)]
    pub url: Option<String>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// JSON array of {name, title, company}
    #[arg(short, long)]
    pub input: PathBuf,
}
