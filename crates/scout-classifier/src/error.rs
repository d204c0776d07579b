//! Error types for classification

use scout_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while classifying a speaker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Malformed speaker record; never retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend output could not be parsed or violated result invariants
    #[error("Validation failure: {0}")]
    Validation(String),

    /// Backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    /// All attempts failed; carries the last cause
    #[error("Classification failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: Box<ClassifierError>,
    },
}

impl ClassifierError {
    /// Whether another attempt may succeed
    ///
    /// Validation failures and transient backend errors are retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClassifierError::Validation(_) => true,
            ClassifierError::Backend(e) => e.is_transient(),
            ClassifierError::InvalidInput(_) | ClassifierError::RetriesExhausted { .. } => false,
        }
    }
}

/// Errors raised when loading templates or configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid value
    #[error("Configuration error: {0}")]
    Invalid(String),

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
