//! Processed speakers and the email eligibility rule

use crate::category::{Category, CompanySize};
use crate::classification::ClassificationResult;
use crate::speaker::SpeakerRecord;
use serde::{Deserialize, Serialize};

/// Subject and body of an outbound email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    /// Subject line
    pub subject: String,

    /// Body text
    pub body: String,
}

impl EmailContent {
    /// Create email content
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Whether a classification qualifies for email content
///
/// Only Builder and Owner companies of Large size are targeted.
pub fn is_eligible(classification: &ClassificationResult) -> bool {
    classification.category().is_target() && classification.company_size() == CompanySize::Large
}

/// A speaker record extended with its classification and email fields
///
/// `email_subject` and `email_body` are populated if and only if the
/// classification is eligible; otherwise both are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedSpeaker {
    record: SpeakerRecord,
    classification: ClassificationResult,
    email_subject: String,
    email_body: String,
}

impl ProcessedSpeaker {
    /// Assemble a processed speaker
    ///
    /// `draft` is invoked only when the classification is eligible.
    ///
    /// # Examples
    ///
    /// ```
    /// use scout_domain::{
    ///     Category, ClassificationResult, CompanySize, EmailContent, ProcessedSpeaker,
    ///     SpeakerRecord,
    /// };
    ///
    /// let record = SpeakerRecord::new("Bob Builder", "Site Manager", "BuildCo");
    /// let small = ClassificationResult::new(
    ///     Category::Builder,
    ///     CompanySize::Small,
    ///     "Small construction company",
    /// ).unwrap();
    ///
    /// let speaker = ProcessedSpeaker::assemble(record, small, |_, _| {
    ///     EmailContent::new("never", "called")
    /// });
    /// assert_eq!(speaker.email_subject(), "");
    /// assert_eq!(speaker.email_body(), "");
    /// ```
    pub fn assemble<F>(record: SpeakerRecord, classification: ClassificationResult, draft: F) -> Self
    where
        F: FnOnce(&SpeakerRecord, &ClassificationResult) -> EmailContent,
    {
        let email = if is_eligible(&classification) {
            draft(&record, &classification)
        } else {
            EmailContent::default()
        };

        Self {
            record,
            classification,
            email_subject: email.subject,
            email_body: email.body,
        }
    }

    /// Source record
    pub fn record(&self) -> &SpeakerRecord {
        &self.record
    }

    /// Speaker's name
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Speaker's title
    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// Speaker's company
    pub fn company(&self) -> &str {
        &self.record.company
    }

    /// Classification result
    pub fn classification(&self) -> &ClassificationResult {
        &self.classification
    }

    /// Assigned category
    pub fn category(&self) -> Category {
        self.classification.category()
    }

    /// Email subject (empty when not eligible)
    pub fn email_subject(&self) -> &str {
        &self.email_subject
    }

    /// Email body (empty when not eligible)
    pub fn email_body(&self) -> &str {
        &self.email_body
    }

    /// Whether email content was generated
    pub fn has_email(&self) -> bool {
        !self.email_subject.is_empty()
    }
}
