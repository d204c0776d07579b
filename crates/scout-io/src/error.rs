//! Error types for speaker sources and result sinks

use thiserror::Error;

/// Errors raised while obtaining speaker records
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Page structure could not be queried
    #[error("Parse error: {0}")]
    Parse(String),

    /// File could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(err.to_string())
    }
}

/// Errors raised while writing results
#[derive(Error, Debug)]
pub enum SinkError {
    /// Output file or directory could not be written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
