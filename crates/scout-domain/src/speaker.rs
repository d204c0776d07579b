//! Speaker records and the request view used for classification

use serde::{Deserialize, Serialize};

/// A conference speaker as supplied by a source
///
/// Records are immutable once read. `title` and `company` may be empty when
/// the source could not split the job line; such records are still carried
/// through the pipeline so the output keeps one row per speaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeakerRecord {
    /// Speaker's full name
    pub name: String,

    /// Job title (may be empty)
    #[serde(default)]
    pub title: String,

    /// Company name (required for classification)
    #[serde(default)]
    pub company: String,
}

impl SpeakerRecord {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            company: company.into(),
        }
    }
}

/// Validated view of a [`SpeakerRecord`], guaranteeing a non-empty company
///
/// Built once per classification attempt and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    company_name: String,
    speaker_name: String,
    speaker_title: String,
}

impl ClassificationRequest {
    /// Build a request from a record
    ///
    /// # Errors
    /// Returns an error if the company is empty or whitespace-only
    pub fn from_record(record: &SpeakerRecord) -> Result<Self, String> {
        let company_name = record.company.trim();
        if company_name.is_empty() {
            return Err(format!("speaker '{}' has no company", record.name));
        }

        Ok(Self {
            company_name: company_name.to_string(),
            speaker_name: record.name.trim().to_string(),
            speaker_title: record.title.trim().to_string(),
        })
    }

    /// Company to classify
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Speaker's name
    pub fn speaker_name(&self) -> &str {
        &self.speaker_name
    }

    /// Speaker's job title (may be empty)
    pub fn speaker_title(&self) -> &str {
        &self.speaker_title
    }
}
