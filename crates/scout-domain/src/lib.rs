//! Speakerscout Domain Layer
//!
//! Core types shared by every other crate in the workspace. External
//! dependencies are limited to `serde` derives, so records can be read from
//! and written to JSON without mirror types, and `thiserror` for
//! [`ValidationError`].
//!
//! ## Key Concepts
//!
//! - **SpeakerRecord**: a conference speaker as supplied by a source
//! - **ClassificationRequest**: validated view of a record, ready for prompting
//! - **ClassificationResult**: category, company size and reasoning; invariants
//!   are enforced at construction
//! - **ProcessedSpeaker**: a record plus its classification and email fields
//! - **Eligibility**: which speakers receive outbound email content

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod classification;
pub mod processed;
pub mod speaker;
pub mod traits;

// Re-exports for convenience
pub use category::{Category, CompanySize};
pub use classification::{ClassificationResult, ValidationError, MIN_REASONING_CHARS};
pub use processed::{is_eligible, EmailContent, ProcessedSpeaker};
pub use speaker::{ClassificationRequest, SpeakerRecord};
