//! Classification result and its construction-time invariants

use crate::category::{Category, CompanySize};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Minimum length of the trimmed reasoning text, in characters
pub const MIN_REASONING_CHARS: usize = 10;

/// Reasons a classification result cannot be constructed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Category literal outside the closed set
    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    /// Company size literal outside the closed set
    #[error("invalid company size '{0}'")]
    InvalidCompanySize(String),

    /// Reasoning is empty or whitespace-only
    #[error("reasoning cannot be empty")]
    EmptyReasoning,

    /// Reasoning shorter than [`MIN_REASONING_CHARS`] after trimming
    #[error("reasoning must be at least {} characters, got {length}", MIN_REASONING_CHARS)]
    ReasoningTooShort {
        /// Trimmed length in characters
        length: usize,
    },
}

/// A validated classification of one speaker's company
///
/// Fields are private so every instance has passed [`ClassificationResult::new`]:
/// the reasoning is stored trimmed and is never shorter than
/// [`MIN_REASONING_CHARS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    category: Category,
    company_size: CompanySize,
    reasoning: String,
}

impl ClassificationResult {
    /// Create a result from typed values
    ///
    /// # Errors
    /// Returns an error if the trimmed reasoning is empty or too short
    ///
    /// # Examples
    ///
    /// ```
    /// use scout_domain::{Category, ClassificationResult, CompanySize};
    ///
    /// let result = ClassificationResult::new(
    ///     Category::Builder,
    ///     CompanySize::Large,
    ///     "  General contractor with national reach  ",
    /// ).unwrap();
    /// assert_eq!(result.reasoning(), "General contractor with national reach");
    ///
    /// assert!(ClassificationResult::new(Category::Other, CompanySize::Small, "   ").is_err());
    /// ```
    pub fn new(
        category: Category,
        company_size: CompanySize,
        reasoning: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let trimmed = reasoning.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyReasoning);
        }

        let length = trimmed.chars().count();
        if length < MIN_REASONING_CHARS {
            return Err(ValidationError::ReasoningTooShort { length });
        }

        Ok(Self {
            category,
            company_size,
            reasoning: trimmed.to_string(),
        })
    }

    /// Create a result from raw literals, normalizing case
    ///
    /// # Errors
    /// Returns an error if either literal is outside its closed set, or if
    /// the reasoning violates [`ClassificationResult::new`]'s rules
    pub fn from_literals(
        category: &str,
        company_size: &str,
        reasoning: &str,
    ) -> Result<Self, ValidationError> {
        let category = Category::parse(category)
            .ok_or_else(|| ValidationError::InvalidCategory(category.trim().to_string()))?;
        let company_size = CompanySize::parse(company_size)
            .ok_or_else(|| ValidationError::InvalidCompanySize(company_size.trim().to_string()))?;
        Self::new(category, company_size, reasoning)
    }

    /// Placeholder recorded for a speaker whose classification failed
    ///
    /// Always `Other` / `Unknown`; the reasoning carries the failure cause.
    pub fn placeholder(cause: impl fmt::Display) -> Self {
        Self {
            category: Category::Other,
            company_size: CompanySize::Unknown,
            reasoning: format!("Classification failed: {}", cause),
        }
    }

    /// Assigned category
    pub fn category(&self) -> Category {
        self.category
    }

    /// Estimated company size
    pub fn company_size(&self) -> CompanySize {
        self.company_size
    }

    /// Trimmed justification text
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }
}
