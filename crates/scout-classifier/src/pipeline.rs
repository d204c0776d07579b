//! Pipeline runner: classify every speaker, draft emails, keep input order

use crate::classifier::ClassificationClient;
use crate::error::ClassifierError;
use futures::stream::{self, StreamExt};
use scout_domain::traits::EmailDrafter;
use scout_domain::{Category, ClassificationResult, ProcessedSpeaker, SpeakerRecord};
use scout_llm::LlmProvider;
use tracing::{debug, info, warn};

/// A speaker whose classification failed terminally
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerFailure {
    /// Position in the input
    pub index: usize,

    /// Speaker's name
    pub name: String,

    /// Terminal error
    pub error: ClassifierError,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// One row per input record, in input order
    pub speakers: Vec<ProcessedSpeaker>,

    /// Speakers whose row carries a placeholder classification
    pub failures: Vec<SpeakerFailure>,
}

impl PipelineReport {
    /// Number of speakers per category, in [`Category::ALL`] order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&category| {
                let count = self
                    .speakers
                    .iter()
                    .filter(|s| s.category() == category)
                    .count();
                (category, count)
            })
            .collect()
    }

    /// Number of rows carrying email content
    pub fn emails_generated(&self) -> usize {
        self.speakers.iter().filter(|s| s.has_email()).count()
    }
}

/// Runs classification for a batch of speakers
///
/// At most `max_concurrent` classifications are in flight. A speaker whose
/// classification fails terminally gets a placeholder row
/// (`Other` / `Unknown`) and an entry in [`PipelineReport::failures`]; the
/// run itself never aborts.
pub struct PipelineRunner<P: LlmProvider, D: EmailDrafter> {
    classifier: ClassificationClient<P>,
    drafter: D,
}

impl<P: LlmProvider, D: EmailDrafter> PipelineRunner<P, D> {
    /// Create a runner
    pub fn new(classifier: ClassificationClient<P>, drafter: D) -> Self {
        Self {
            classifier,
            drafter,
        }
    }

    /// Classifier in use
    pub fn classifier(&self) -> &ClassificationClient<P> {
        &self.classifier
    }

    /// Process every record
    pub async fn run(&self, records: Vec<SpeakerRecord>) -> PipelineReport {
        let config = self.classifier.config();
        let delay = config.request_delay();
        let total = records.len();

        info!(
            speakers = total,
            max_concurrent = config.max_concurrent,
            "Classifying speakers"
        );

        let outcomes: Vec<Result<ClassificationResult, ClassifierError>> =
            stream::iter(records.iter().enumerate())
                .map(|(index, record)| async move {
                    if !delay.is_zero() {
                        self.classifier.sleeper().sleep(delay).await;
                    }
                    debug!(index, name = %record.name, "Classifying speaker");
                    self.classifier.classify(record).await
                })
                .buffered(config.max_concurrent.max(1))
                .collect()
                .await;

        let mut speakers = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (index, (record, outcome)) in records.into_iter().zip(outcomes).enumerate() {
            let classification = match outcome {
                Ok(classification) => classification,
                Err(error) => {
                    warn!(index, name = %record.name, error = %error, "Classification failed");
                    let placeholder = ClassificationResult::placeholder(&error);
                    failures.push(SpeakerFailure {
                        index,
                        name: record.name.clone(),
                        error,
                    });
                    placeholder
                }
            };

            speakers.push(ProcessedSpeaker::assemble(record, classification, |r, c| {
                self.drafter.draft(r, c)
            }));
        }

        let report = PipelineReport { speakers, failures };
        info!(
            speakers = total,
            failures = report.failures.len(),
            emails = report.emails_generated(),
            "Pipeline complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;
    use crate::retry::RecordingSleeper;
    use scout_domain::{CompanySize, EmailContent};
    use scout_llm::MockProvider;
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedDrafter;

    impl EmailDrafter for FixedDrafter {
        fn draft(&self, record: &SpeakerRecord, _: &ClassificationResult) -> EmailContent {
            EmailContent::new(format!("Hi {}", record.name), "Body")
        }
    }

    fn runner(provider: MockProvider, delay_ms: u64) -> (PipelineRunner<MockProvider, FixedDrafter>, RecordingSleeper) {
        let sleeper = RecordingSleeper::new();
        let config = ClassifierConfig {
            request_delay_ms: delay_ms,
            ..ClassifierConfig::default()
        };
        let client = ClassificationClient::new(provider, config).with_sleeper(Arc::new(sleeper.clone()));
        (PipelineRunner::new(client, FixedDrafter), sleeper)
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (runner, _) = runner(MockProvider::default(), 0);
        let report = runner.run(Vec::new()).await;
        assert!(report.speakers.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(report.emails_generated(), 0);
    }

    #[tokio::test]
    async fn test_failed_speaker_gets_placeholder() {
        let provider = MockProvider::new("Category: Owner\nCompany Size: Large\nReasoning: Airport operator and owner")
            .with_response("Acme Consulting", "Category: Consultant\nCompany Size: Large\nReasoning: Advisory services firm");
        let (runner, _) = runner(provider, 0);

        let report = runner
            .run(vec![
                SpeakerRecord::new("Ann", "Director", "Heathrow"),
                SpeakerRecord::new("Bob", "Partner", "Acme Consulting"),
                SpeakerRecord::new("Cat", "CEO", ""),
            ])
            .await;

        assert_eq!(report.speakers.len(), 3);
        assert_eq!(report.speakers[0].category(), Category::Owner);
        assert!(report.speakers[0].has_email());

        let failed = &report.speakers[1];
        assert_eq!(failed.category(), Category::Other);
        assert_eq!(failed.classification().company_size(), CompanySize::Unknown);
        assert!(failed.classification().reasoning().starts_with("Classification failed:"));
        assert_eq!(failed.email_subject(), "");

        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].index, 1);
        assert!(matches!(report.failures[0].error, ClassifierError::RetriesExhausted { .. }));
        assert_eq!(report.failures[1].index, 2);
        assert!(matches!(report.failures[1].error, ClassifierError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_request_delay_applied_per_speaker() {
        let provider = MockProvider::new("Category: Other\nCompany Size: Small\nReasoning: Industry body, not a target");
        let (runner, sleeper) = runner(provider, 500);

        runner
            .run(vec![
                SpeakerRecord::new("A", "", "One"),
                SpeakerRecord::new("B", "", "Two"),
            ])
            .await;

        assert_eq!(sleeper.waits(), vec![Duration::from_millis(500); 2]);
    }

    #[tokio::test]
    async fn test_report_counts() {
        let provider = MockProvider::new("Category: Other\nCompany Size: Small\nReasoning: Industry body, not a target")
            .with_response("BuildCo", "Category: Builder\nCompany Size: Large\nReasoning: National general contractor")
            .with_response("SmallCo", "Category: Builder\nCompany Size: Small\nReasoning: Local building contractor");
        let (runner, _) = runner(provider, 0);

        let report = runner
            .run(vec![
                SpeakerRecord::new("A", "", "BuildCo"),
                SpeakerRecord::new("B", "", "SmallCo"),
                SpeakerRecord::new("C", "", "Institute"),
            ])
            .await;

        let counts = report.category_counts();
        assert_eq!(counts[0], (Category::Builder, 2));
        assert_eq!(counts[4], (Category::Other, 1));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 3);
        assert_eq!(report.emails_generated(), 1);
    }
}
