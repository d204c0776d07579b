//! Backend construction from configuration.

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::error::{CliError, Result};
use scout_llm::{LlmProvider, OllamaProvider, OpenAiProvider};
use tracing::info;

/// Build the configured backend.
///
/// Fails when no model is set, or when the OpenAI endpoint is used without an
/// API key.
pub fn build_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    let model = config.model()?;
    let timeout = config.classifier.request_timeout();
    let temperature = config.classifier.temperature;

    let provider: Box<dyn LlmProvider> = match config.llm.provider {
        ProviderKind::OpenAi => {
            let api_key = std::env::var(&config.llm.api_key_env)
                .ok()
                .filter(|key| !key.trim().is_empty());

            let mut provider = OpenAiProvider::new(model)
                .with_timeout(timeout)
                .with_temperature(temperature);
            match (&config.llm.endpoint, api_key) {
                (Some(endpoint), key) => {
                    provider = provider.with_base_url(endpoint.as_str());
                    if let Some(key) = key {
                        provider = provider.with_api_key(key);
                    }
                }
                (None, Some(key)) => provider = provider.with_api_key(key),
                (None, None) => {
                    return Err(CliError::Config(format!(
                        "{} is not set",
                        config.llm.api_key_env
                    )));
                }
            }
            Box::new(provider)
        }
        ProviderKind::Ollama => {
            let provider = match &config.llm.endpoint {
                Some(endpoint) => OllamaProvider::new(endpoint.as_str(), model),
                None => OllamaProvider::default_endpoint(model),
            };
            Box::new(provider.with_timeout(timeout).with_temperature(temperature))
        }
    };

    info!(provider = ?config.llm.provider, model, "Backend configured");
    Ok(provider)
}
