//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::{ClassificationResult, EmailContent, ProcessedSpeaker, SpeakerRecord};

/// Trait for drafting outbound email content
///
/// Implemented by the application layer (scout-classifier). Only called for
/// eligible speakers; implementations must return non-empty content.
pub trait EmailDrafter {
    /// Draft subject and body for a classified speaker
    fn draft(&self, record: &SpeakerRecord, classification: &ClassificationResult) -> EmailContent;
}

/// Trait for writing processed speakers to their final destination
///
/// Implemented by the infrastructure layer (scout-io)
pub trait ResultSink {
    /// Error type for sink operations
    type Error;

    /// Write all rows, replacing any previous output
    fn write_all(&mut self, speakers: &[ProcessedSpeaker]) -> Result<(), Self::Error>;
}
