//! Speakerscout Classifier
//!
//! Classifies conference speakers' companies with an LLM and drafts outbound
//! emails for the ones worth contacting.
//!
//! # Overview
//!
//! The backend answers in free text. [`ClassificationClient`] renders the
//! prompt, calls the backend, parses the labelled answer and validates it
//! against the closed category and size sets. Parse failures, invariant
//! violations and transient backend errors are retried under an explicit
//! [`RetryPolicy`]; a speaker with no company is rejected before any call.
//!
//! # Architecture
//!
//! ```text
//! SpeakerRecord → PipelineRunner → ClassificationClient → LLM
//!                       │                  │
//!                       │            parse + validate (retry)
//!                       ▼
//!                 EmailDrafter (Builder/Owner + Large only) → ProcessedSpeaker
//! ```
//!
//! # Example Usage
//!
//! ```
//! use scout_classifier::{ClassificationClient, ClassifierConfig, PipelineRunner, TemplateDrafter};
//! use scout_domain::SpeakerRecord;
//! use scout_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), scout_classifier::ConfigError> {
//! let llm = MockProvider::new(
//!     "Category: Builder\nCompany Size: Large\nReasoning: National general contractor",
//! );
//! let config = ClassifierConfig { request_delay_ms: 0, ..ClassifierConfig::default() };
//! let runner = PipelineRunner::new(
//!     ClassificationClient::new(llm, config),
//!     TemplateDrafter::builtin()?,
//! );
//!
//! let report = runner
//!     .run(vec![SpeakerRecord::new("Jane Doe", "Project Manager", "ABC Construction")])
//!     .await;
//!
//! assert_eq!(report.emails_generated(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod email;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod retry;


pub use classifier::ClassificationClient;
pub use config::{ClassifierConfig, RetryConfig};
pub use email::{EmailTemplate, TemplateDrafter, DEFAULT_EMAIL_TEMPLATES};
pub use error::{ClassifierError, ConfigError};
pub use parser::parse_classification;
pub use pipeline::{PipelineReport, PipelineRunner, SpeakerFailure};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT_TEMPLATE};
pub use retry::{RecordingSleeper, RetryError, RetryPolicy, Sleeper, TokioSleeper};
