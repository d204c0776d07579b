//! Speakerscout LLM Provider Layer
//!
//! Pluggable text-generation backends behind a single async trait.
//!
//! # Architecture
//!
//! Every provider performs exactly one completion request per
//! [`LlmProvider::generate`] call and maps failures onto [`LlmError`]. Retrying
//! is the caller's concern; [`LlmError::is_transient`] tells it which failures
//! are worth another attempt.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use scout_llm::{LlmProvider, MockProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

pub use mock::{MockProvider, MockReply};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Sampling temperature used for classification calls
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or connection failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Backend returned a 5xx status
    #[error("Server error (HTTP {status}): {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response envelope could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether re-sending the same request may succeed
    ///
    /// Timeouts, rate limits, connection failures and server errors are
    /// transient. Authentication, unknown models and malformed envelopes are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_)
                | LlmError::Timeout
                | LlmError::RateLimitExceeded
                | LlmError::Server { .. }
        )
    }

    /// Map a non-success HTTP status to an error
    pub(crate) fn from_status(status: StatusCode, body: String, model: &str) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LlmError::Authentication(format!("HTTP {}: {}", status, truncate(&body)))
            }
            StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout,
            s if s.is_server_error() => LlmError::Server {
                status: s.as_u16(),
                body: truncate(&body),
            },
            s => LlmError::Other(format!("HTTP {}: {}", s, truncate(&body))),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

fn truncate(body: &str) -> String {
    const MAX: usize = 500;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

/// A text-generation backend
///
/// One call is one completion request: a rendered prompt in, free text out.
/// Providers are shared read-only across concurrent calls.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, used in logs
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<P> LlmProvider for Box<P>
where
    P: LlmProvider + ?Sized,
{
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
