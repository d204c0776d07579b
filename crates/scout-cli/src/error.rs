//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template or classifier configuration error
    #[error(transparent)]
    Classifier(#[from] scout_classifier::ConfigError),

    /// Speaker source error
    #[error("Source error: {0}")]
    Source(#[from] scout_io::SourceError),

    /// Output error
    #[error("Output error: {0}")]
    Sink(#[from] scout_io::SinkError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Source yielded nothing to process
    #[error("No speakers found in {0}")]
    NoSpeakers(String),
}
