//! Speakerscout I/O
//!
//! Where speakers come from and where results go.
//!
//! - [`ConferenceScraper`]: fetches the conference speaker listing and parses
//!   each speaker card into a [`SpeakerRecord`]
//! - [`JsonFileSource`] / [`save_raw_speakers`]: the raw speakers JSON file
//! - [`CsvSink`]: the six-column email list

#![warn(missing_docs)]

mod conference;
mod csv_sink;
mod error;
mod json_source;

use async_trait::async_trait;
use scout_domain::SpeakerRecord;

pub use conference::{parse_job_text, parse_speakers, ConferenceScraper, DEFAULT_SPEAKERS_URL};
pub use csv_sink::{CsvSink, CSV_HEADERS};
pub use error::{SinkError, SourceError};
pub use json_source::{save_raw_speakers, JsonFileSource};

/// Supplier of raw speaker records
#[async_trait]
pub trait SpeakerSource: Send + Sync {
    /// Read every available speaker, in source order
    async fn fetch(&self) -> Result<Vec<SpeakerRecord>, SourceError>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}
