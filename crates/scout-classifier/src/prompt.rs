//! Prompt template rendering for classification

use crate::error::ConfigError;
use scout_domain::ClassificationRequest;
use std::path::Path;

/// Built-in classification prompt
pub const DEFAULT_PROMPT_TEMPLATE: &str = include_str!("../templates/classification_prompt.txt");

const COMPANY_PLACEHOLDER: &str = "{company_name}";
const SPEAKER_PLACEHOLDER: &str = "{speaker_name}";
const TITLE_PLACEHOLDER: &str = "{speaker_title}";

/// Classification prompt template
///
/// Placeholders `{company_name}`, `{speaker_name}` and `{speaker_title}` are
/// substituted per request. `{company_name}` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template from text
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(COMPANY_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "prompt template must contain {}",
                COMPANY_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    /// Load a template from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(text)
    }

    /// Render the prompt for one request
    pub fn render(&self, request: &ClassificationRequest) -> String {
        let title = if request.speaker_title().is_empty() {
            "(not listed)"
        } else {
            request.speaker_title()
        };

        self.template
            .replace(COMPANY_PLACEHOLDER, request.company_name())
            .replace(SPEAKER_PLACEHOLDER, request.speaker_name())
            .replace(TITLE_PLACEHOLDER, title)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}
