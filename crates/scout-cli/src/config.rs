//! Configuration management for the CLI.
//!
//! Precedence, lowest first: built-in defaults, the TOML file, then flags and
//! environment variables (clap reads both; `.env` is loaded beforehand).

use crate::cli::{Cli, ProviderKind};
use crate::error::{CliError, Result};
use scout_classifier::ClassifierConfig;
use scout_io::DEFAULT_SPEAKERS_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backend selection
    #[serde(default)]
    pub llm: LlmSettings,

    /// Classification and pipeline settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Backend kind
    #[serde(default)]
    pub provider: ProviderKind,

    /// Classification model; required before classifying
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory for raw_speakers.json and email_list.csv
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Classification prompt override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<PathBuf>,

    /// Email templates override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_templates: Option<PathBuf>,

    /// Speaker listing page
    #[serde(default = "default_speakers_url")]
    pub speakers_url: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Sample emails printed after a run
    #[serde(default = "default_sample_emails")]
    pub sample_emails: usize,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".speakerscout").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_toml(&fs::read_to_string(&path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.classifier.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply flag and environment overrides, then re-validate.
    pub fn apply_overrides(&mut self, cli: &Cli) -> Result<()> {
        if let Some(dir) = &cli.output_dir {
            self.paths.output_dir = dir.clone();
        }
        if cli.debug {
            self.classifier.debug = true;
        }
        if cli.no_color {
            self.settings.color = false;
        }

        let llm = &cli.llm;
        if let Some(model) = &llm.model {
            self.llm.model = Some(model.clone());
        }
        if let Some(provider) = llm.provider {
            self.llm.provider = provider;
        }
        if let Some(endpoint) = &llm.endpoint {
            self.llm.endpoint = Some(endpoint.clone());
        }
        if let Some(max_concurrent) = llm.max_concurrent {
            self.classifier.max_concurrent = max_concurrent;
        }
        if let Some(delay) = llm.request_delay {
            if !(delay.is_finite() && delay >= 0.0) {
                return Err(CliError::Config(format!(
                    "request delay must be a non-negative number of seconds, got {}",
                    delay
                )));
            }
            self.classifier.request_delay_ms = (delay * 1000.0).round() as u64;
        }

        self.classifier.validate()?;
        Ok(())
    }

    /// Classification model, required before any backend call.
    pub fn model(&self) -> Result<&str> {
        self.llm
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| {
                CliError::Config(
                    "no classification model set; use --model, CLASSIFICATION_MODEL or [llm].model"
                        .into(),
                )
            })
    }

    /// Raw speakers JSON path.
    pub fn raw_speakers_path(&self) -> PathBuf {
        self.paths.output_dir.join("raw_speakers.json")
    }

    /// Email list CSV path.
    pub fn email_list_path(&self) -> PathBuf {
        self.paths.output_dir.join("email_list.csv")
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            endpoint: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            prompt_template: None,
            email_templates: None,
            speakers_url: default_speakers_url(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            sample_emails: default_sample_emails(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_speakers_url() -> String {
    DEFAULT_SPEAKERS_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_sample_emails() -> usize {
    2
}
