//! Classification client: backend call, validation and bounded retry

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classification;
use crate::prompt::PromptTemplate;
use crate::retry::{RetryError, RetryPolicy, Sleeper, TokioSleeper};
use scout_domain::{ClassificationRequest, ClassificationResult, SpeakerRecord};
use scout_llm::{LlmError, LlmProvider};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Classifies one speaker's company per call
///
/// Every successful result satisfies the [`ClassificationResult`] invariants.
/// Failures are typed: a malformed record is rejected without contacting the
/// backend, validation failures and transient backend errors are retried
/// under the configured [`RetryPolicy`], and anything else is returned
/// immediately.
pub struct ClassificationClient<P: LlmProvider> {
    provider: Arc<P>,
    prompt: PromptTemplate,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    config: ClassifierConfig,
}

impl<P: LlmProvider> ClassificationClient<P> {
    /// Create a client with the built-in prompt and real timers
    pub fn new(provider: P, config: ClassifierConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            prompt: PromptTemplate::default(),
            policy: RetryPolicy::from_config(&config.retry),
            sleeper: Arc::new(TokioSleeper),
            config,
        }
    }

    /// Use a custom prompt template
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replace the timer used for retry waits and request delays
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Backend in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub(crate) fn sleeper(&self) -> &dyn Sleeper {
        self.sleeper.as_ref()
    }

    /// Classify one speaker's company
    ///
    /// # Errors
    /// - [`ClassifierError::InvalidInput`] if the company is empty; no backend call is made
    /// - [`ClassifierError::RetriesExhausted`] if every attempt failed with a retryable error
    /// - Any non-retryable error from the first attempt that raised it
    pub async fn classify(
        &self,
        record: &SpeakerRecord,
    ) -> Result<ClassificationResult, ClassifierError> {
        let request =
            ClassificationRequest::from_record(record).map_err(ClassifierError::InvalidInput)?;
        let company = request.company_name();
        let debug_retries = self.config.debug;

        let outcome = self
            .policy
            .run(
                self.sleeper(),
                |_| self.attempt(&request),
                ClassifierError::is_retryable,
                |attempt, error, wait| {
                    if debug_retries {
                        warn!(
                            company,
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            error = %error,
                            "Classification attempt failed, retrying"
                        );
                    }
                },
            )
            .await;

        match outcome {
            Ok(result) => {
                debug!(
                    company,
                    category = %result.category(),
                    company_size = %result.company_size(),
                    "Classified"
                );
                Ok(result)
            }
            Err(RetryError::Aborted { error, .. }) => Err(error),
            Err(RetryError::Exhausted { attempts, last }) => {
                Err(ClassifierError::RetriesExhausted {
                    attempts,
                    last: Box::new(last),
                })
            }
        }
    }

    /// One backend call plus parsing, bounded by the request timeout
    async fn attempt(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult, ClassifierError> {
        let prompt = self.prompt.render(request);
        debug!(
            model = self.provider.model_name(),
            prompt_chars = prompt.len(),
            "Calling backend"
        );

        let response = timeout(self.config.request_timeout(), self.provider.generate(&prompt))
            .await
            .map_err(|_| LlmError::Timeout)??;

        parse_classification(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RecordingSleeper;
    use scout_domain::{Category, CompanySize};
    use scout_llm::MockProvider;
    use std::time::Duration;

    const BUILDER_LARGE: &str =
        "Category: Builder\nCompany Size: Large\nReasoning: General contractor, mid-size regional builder";

    fn client(provider: MockProvider) -> (ClassificationClient<MockProvider>, RecordingSleeper) {
        let sleeper = RecordingSleeper::new();
        let client = ClassificationClient::new(provider, ClassifierConfig::default())
            .with_sleeper(Arc::new(sleeper.clone()));
        (client, sleeper)
    }

    fn jane() -> SpeakerRecord {
        SpeakerRecord::new("Jane Doe", "Project Manager", "ABC Construction")
    }

    #[tokio::test]
    async fn test_classify_success_first_attempt() {
        let provider = MockProvider::new(BUILDER_LARGE);
        let (client, sleeper) = client(provider.clone());

        let result = client.classify(&jane()).await.unwrap();

        assert_eq!(result.category(), Category::Builder);
        assert_eq!(result.company_size(), CompanySize::Large);
        assert_eq!(provider.call_count(), 1);
        assert!(sleeper.waits().is_empty());
        assert!(provider.prompts()[0].contains("ABC Construction"));
    }

    #[tokio::test]
    async fn test_empty_company_makes_no_calls() {
        let provider = MockProvider::new(BUILDER_LARGE);
        let (client, sleeper) = client(provider.clone());

        let record = SpeakerRecord::new("John", "CEO", "  ");
        let err = client.classify(&record).await.unwrap_err();

        assert!(matches!(err, ClassifierError::InvalidInput(_)));
        assert_eq!(provider.call_count(), 0);
        assert!(sleeper.waits().is_empty());
    }

    #[tokio::test]
    async fn test_transient_error_retried() {
        let provider = MockProvider::new(BUILDER_LARGE)
            .with_scripted(LlmError::RateLimitExceeded)
            .with_scripted(LlmError::Server {
                status: 503,
                body: "busy".into(),
            });
        let (client, sleeper) = client(provider.clone());

        let result = client.classify(&jane()).await.unwrap();

        assert_eq!(result.category(), Category::Builder);
        assert_eq!(provider.call_count(), 3);
        assert_eq!(
            sleeper.waits(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }

    #[tokio::test]
    async fn test_authentication_error_not_retried() {
        let provider = MockProvider::new(BUILDER_LARGE)
            .with_scripted(LlmError::Authentication("invalid key".into()));
        let (client, sleeper) = client(provider.clone());

        let err = client.classify(&jane()).await.unwrap_err();

        assert!(matches!(
            err,
            ClassifierError::Backend(LlmError::Authentication(_))
        ));
        assert_eq!(provider.call_count(), 1);
        assert!(sleeper.waits().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_carries_last_cause() {
        let provider = MockProvider::new("no idea");
        let (client, sleeper) = client(provider.clone());

        let err = client.classify(&jane()).await.unwrap_err();

        match err {
            ClassifierError::RetriesExhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ClassifierError::Validation(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.call_count(), 3);
        assert_eq!(sleeper.waits().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_attempt_budget() {
        let mut config = ClassifierConfig::default();
        config.retry.max_attempts = 1;
        let provider = MockProvider::new("no idea");
        let client = ClassificationClient::new(provider.clone(), config)
            .with_sleeper(Arc::new(RecordingSleeper::new()));

        let err = client.classify(&jane()).await.unwrap_err();

        assert!(matches!(err, ClassifierError::RetriesExhausted { attempts: 1, .. }));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out_and_retries() {
        let mut config = ClassifierConfig::default();
        config.request_timeout_secs = 1;
        let provider = MockProvider::new(BUILDER_LARGE)
            .with_delay("ABC Construction", Duration::from_secs(30));
        let client = ClassificationClient::new(provider.clone(), config)
            .with_sleeper(Arc::new(RecordingSleeper::new()));

        let err = client.classify(&jane()).await.unwrap_err();

        match err {
            ClassifierError::RetriesExhausted { last, .. } => {
                assert_eq!(*last, ClassifierError::Backend(LlmError::Timeout));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_custom_prompt_is_used() {
        let provider = MockProvider::new(BUILDER_LARGE);
        let (client, _) = client(provider.clone());
        let client = client.with_prompt(PromptTemplate::new("Classify {company_name}").unwrap());

        client.classify(&jane()).await.unwrap();

        assert_eq!(provider.prompts(), vec!["Classify ABC Construction".to_string()]);
    }
}
