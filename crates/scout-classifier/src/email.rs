//! Template-based outbound email drafting

use crate::error::ConfigError;
use rand::Rng;
use scout_domain::traits::EmailDrafter;
use scout_domain::{Category, ClassificationResult, EmailContent, SpeakerRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Built-in email templates
pub const DEFAULT_EMAIL_TEMPLATES: &str = include_str!("../templates/email_templates.json");

/// Subject and body templates for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Candidate subject lines; one is picked at random per email
    pub subject_templates: Vec<String>,

    /// Body text
    pub body_template: String,
}

/// Drafts emails by substituting speaker fields into per-category templates
///
/// Placeholders: `{speaker_name}`, `{first_name}`, `{company_name}`,
/// `{speaker_title}`. Templates for Builder and Owner are required, so
/// drafting never fails for an eligible speaker.
#[derive(Debug, Clone)]
pub struct TemplateDrafter {
    templates: HashMap<Category, EmailTemplate>,
}

impl TemplateDrafter {
    /// Build a drafter from templates keyed by category
    pub fn new(templates: HashMap<Category, EmailTemplate>) -> Result<Self, ConfigError> {
        for category in Category::ALL.iter().filter(|c| c.is_target()) {
            let template = templates.get(category).ok_or_else(|| {
                ConfigError::Invalid(format!("missing email template for {}", category))
            })?;
            if template.subject_templates.iter().all(|s| s.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "email template for {} has no subject lines",
                    category
                )));
            }
            if template.body_template.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "email template for {} has an empty body",
                    category
                )));
            }
        }
        Ok(Self { templates })
    }

    /// Templates shipped with the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_EMAIL_TEMPLATES)
    }

    /// Parse templates from JSON: `{"Builder": {"subject_templates": [..], "body_template": ".."}, ..}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, EmailTemplate> = serde_json::from_str(json)?;
        let mut templates = HashMap::with_capacity(raw.len());
        for (key, template) in raw {
            let category = Category::parse(&key).ok_or_else(|| {
                ConfigError::Invalid(format!("unknown category '{}' in email templates", key))
            })?;
            templates.insert(category, template);
        }
        Self::new(templates)
    }

    /// Load templates from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Template for a category, if any
    pub fn template(&self, category: Category) -> Option<&EmailTemplate> {
        self.templates.get(&category)
    }
}

impl EmailDrafter for TemplateDrafter {
    fn draft(&self, record: &SpeakerRecord, classification: &ClassificationResult) -> EmailContent {
        let Some(template) = self.templates.get(&classification.category()) else {
            return EmailContent::default();
        };

        let subjects: Vec<&String> = template
            .subject_templates
            .iter()
            .filter(|s| !s.trim().is_empty())
            .collect();
        let subject = if subjects.is_empty() {
            String::new()
        } else {
            let mut rng = rand::thread_rng();
            fill(subjects[rng.gen_range(0..subjects.len())], record)
        };

        EmailContent::new(subject, fill(&template.body_template, record))
    }
}

fn fill(template: &str, record: &SpeakerRecord) -> String {
    let name = record.name.trim();
    let first_name = name.split_whitespace().next().unwrap_or(name);

    template
        .replace("{speaker_name}", name)
        .replace("{first_name}", first_name)
        .replace("{company_name}", record.company.trim())
        .replace("{speaker_title}", record.title.trim())
}
