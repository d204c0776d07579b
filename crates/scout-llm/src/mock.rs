//! Deterministic provider for tests
//!
//! Replies are resolved in this order: the scripted queue (one entry consumed
//! per call), then the first registered response whose key occurs in the
//! prompt, then the default response.

use crate::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A single canned reply
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with this error
    Error(LlmError),
}

impl From<&str> for MockReply {
    fn from(text: &str) -> Self {
        MockReply::Text(text.to_string())
    }
}

impl From<String> for MockReply {
    fn from(text: String) -> Self {
        MockReply::Text(text)
    }
}

impl From<LlmError> for MockReply {
    fn from(error: LlmError) -> Self {
        MockReply::Error(error)
    }
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<MockReply>,
    keyed: Vec<(String, MockReply)>,
    delays: Vec<(String, Duration)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Clones share state, so a clone handed to the code under test still reports
/// call counts to the original.
///
/// # Examples
///
/// ```
/// use scout_llm::{LlmError, LlmProvider, MockProvider};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = MockProvider::new("fallback")
///     .with_response("ABC Construction", "Category: Builder")
///     .with_scripted(LlmError::Timeout);
///
/// // Scripted replies are consumed first
/// assert!(provider.generate("Company: ABC Construction").await.is_err());
/// assert_eq!(provider.generate("Company: ABC Construction").await.unwrap(), "Category: Builder");
/// assert_eq!(provider.generate("Company: Tech Corp").await.unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reply with `reply` whenever the prompt contains `key`
    pub fn with_response(self, key: impl Into<String>, reply: impl Into<MockReply>) -> Self {
        self.state().keyed.push((key.into(), reply.into()));
        self
    }

    /// Queue a reply consumed by the next call, regardless of prompt
    pub fn with_scripted(self, reply: impl Into<MockReply>) -> Self {
        self.push_scripted(reply);
        self
    }

    /// Delay replies for prompts containing `key`
    pub fn with_delay(self, key: impl Into<String>, delay: Duration) -> Self {
        self.state().delays.push((key.into(), delay));
        self
    }

    /// Queue a reply consumed by the next call
    pub fn push_scripted(&self, reply: impl Into<MockReply>) {
        self.state().scripted.push_back(reply.into());
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, prompt: &str) -> (Option<Duration>, MockReply) {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let delay = state
            .delays
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, delay)| *delay);

        let reply = state
            .scripted
            .pop_front()
            .or_else(|| {
                state
                    .keyed
                    .iter()
                    .find(|(key, _)| prompt.contains(key.as_str()))
                    .map(|(_, reply)| reply.clone())
            })
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()));

        (delay, reply)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        // Lock is released before any await
        let (delay, reply) = self.resolve(prompt);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(error) => Err(error),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
