//! Parse labelled free-text backend output into a classification
//!
//! The backend answers in a line layout rather than a schema-constrained
//! format:
//!
//! ```text
//! Category: Builder
//! Company Size: Large
//! Reasoning: General contractor, mid-size regional builder
//! ```
//!
//! Labels are matched case-insensitively after stripping list and markdown
//! markers. Reasoning may continue over following lines until the next label.
//! Every failure here is a [`ClassifierError::Validation`], the same class as
//! an invariant violation, so both trigger a retry.

use crate::error::ClassifierError;
use scout_domain::ClassificationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Category,
    CompanySize,
    Reasoning,
}

impl Label {
    fn name(&self) -> &'static str {
        match self {
            Label::Category => "Category",
            Label::CompanySize => "Company Size",
            Label::Reasoning => "Reasoning",
        }
    }

    fn from_text(label: &str) -> Option<Self> {
        let normalized = label
            .replace(['*', '`'], "")
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "category" | "company category" => Some(Label::Category),
            "company size" | "size" => Some(Label::CompanySize),
            "reasoning" | "reason" => Some(Label::Reasoning),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Fields {
    category: Option<String>,
    company_size: Option<String>,
    reasoning: Option<String>,
}

impl Fields {
    fn slot(&mut self, label: Label) -> &mut Option<String> {
        match label {
            Label::Category => &mut self.category,
            Label::CompanySize => &mut self.company_size,
            Label::Reasoning => &mut self.reasoning,
        }
    }
}

/// Parse backend output into a validated classification
pub fn parse_classification(response: &str) -> Result<ClassificationResult, ClassifierError> {
    let fields = collect_fields(response);

    let category = require(fields.category, Label::Category)?;
    let company_size = require(fields.company_size, Label::CompanySize)?;
    let reasoning = require(fields.reasoning, Label::Reasoning)?;

    let category = clean_literal(&category, Label::Category)?;
    let company_size = clean_literal(&company_size, Label::CompanySize)?;

    ClassificationResult::from_literals(&category, &company_size, &reasoning)
        .map_err(|e| ClassifierError::Validation(e.to_string()))
}

fn collect_fields(response: &str) -> Fields {
    let mut fields = Fields::default();
    // Label whose value is still accepting continuation lines
    let mut open: Option<Label> = None;

    for raw_line in response.lines() {
        let line = strip_markers(raw_line);
        if line.is_empty() || line.starts_with("```") {
            continue;
        }

        if let Some((label, value)) = split_label(line) {
            let slot = fields.slot(label);
            if slot.is_none() {
                *slot = Some(value.to_string());
                open = (label == Label::Reasoning).then_some(label);
            } else {
                // First occurrence wins; ignore repeats and what follows them
                open = None;
            }
            continue;
        }

        if let Some(label) = open {
            if let Some(value) = fields.slot(label) {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line);
            }
        }
    }

    fields
}

fn split_label(line: &str) -> Option<(Label, &str)> {
    let (label, value) = line.split_once(':')?;
    let label = Label::from_text(label)?;
    Some((label, value.trim().trim_start_matches("**").trim()))
}

fn strip_markers(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| matches!(c, '-' | '*' | '#' | '>' | '•') || c.is_whitespace())
        .trim()
}

fn require(value: Option<String>, label: Label) -> Result<String, ClassifierError> {
    value.ok_or_else(|| {
        ClassifierError::Validation(format!("missing '{}' label in response", label.name()))
    })
}

/// Strip decoration around an enumeration literal
fn clean_literal(value: &str, label: Label) -> Result<String, ClassifierError> {
    let cleaned = value
        .trim()
        .trim_matches(|c: char| {
            matches!(c, '*' | '`' | '"' | '\'' | '[' | ']' | '(' | ')' | '<' | '>' | '.')
                || c.is_whitespace()
        })
        .to_string();

    if cleaned.contains('|') || cleaned.contains('/') {
        return Err(ClassifierError::Validation(format!(
            "ambiguous {} value '{}'",
            label.name(),
            value.trim()
        )));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::{Category, CompanySize};

    #[test]
    fn test_parse_plain_layout() {
        let response = "Category: Builder\nCompany Size: Large\nReasoning: General contractor, mid-size regional builder";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Builder);
        assert_eq!(result.company_size(), CompanySize::Large);
        assert_eq!(result.reasoning(), "General contractor, mid-size regional builder");
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        let response = "  category :   owner  \n   COMPANY SIZE:small\n reasoning:   Regional property developer   ";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Owner);
        assert_eq!(result.company_size(), CompanySize::Small);
        assert_eq!(result.reasoning(), "Regional property developer");
    }

    #[test]
    fn test_parse_markdown_decorations() {
        let response = r#"Here is my answer:

- **Category:** [Partner]
- **Company_Size:** "Large".
- **Reasoning:** Construction software vendor integrating with site workflows."#;
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Partner);
        assert_eq!(result.company_size(), CompanySize::Large);
        assert!(result.reasoning().starts_with("Construction software vendor"));
    }

    #[test]
    fn test_parse_code_fenced_answer() {
        let response = "```\nCategory: Competitor\nCompany Size: Unknown\nReasoning: Sells drone mapping software\n```";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Competitor);
        assert_eq!(result.company_size(), CompanySize::Unknown);
    }

    #[test]
    fn test_reasoning_continues_over_lines() {
        let response = "Category: Builder\nCompany Size: Large\nReasoning: National contractor.\nDelivers rail and highway projects.";
        let result = parse_classification(response).unwrap();
        assert_eq!(
            result.reasoning(),
            "National contractor. Delivers rail and highway projects."
        );
    }

    #[test]
    fn test_reasoning_before_other_labels() {
        let response = "Reasoning: Owns and operates airports\nCategory: Owner\nSize: Large";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Owner);
        assert_eq!(result.reasoning(), "Owns and operates airports");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let response = "Category: Builder\nCategory: Other\nCompany Size: Large\nReasoning: Regional general contractor";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Builder);
    }

    #[test]
    fn test_missing_label_is_validation_failure() {
        let err = parse_classification("Category: Builder\nReasoning: Big contractor firm").unwrap_err();
        assert!(matches!(err, ClassifierError::Validation(ref m) if m.contains("Company Size")));
    }

    #[test]
    fn test_unparsable_text_is_validation_failure() {
        let err = parse_classification("I'm not sure about this company.").unwrap_err();
        assert!(matches!(err, ClassifierError::Validation(_)));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let response = "Category: Consultant\nCompany Size: Large\nReasoning: Advisory firm for contractors";
        let err = parse_classification(response).unwrap_err();
        assert!(matches!(err, ClassifierError::Validation(ref m) if m.contains("Consultant")));
    }

    #[test]
    fn test_template_echo_rejected() {
        let response = "Category: <Builder|Owner|Partner|Competitor|Other>\nCompany Size: <Small|Large|Unknown>\nReasoning: <one or two sentences>";
        let err = parse_classification(response).unwrap_err();
        assert!(matches!(err, ClassifierError::Validation(ref m) if m.contains("ambiguous")));
    }

    #[test]
    fn test_short_reasoning_rejected() {
        let response = "Category: Builder\nCompany Size: Large\nReasoning: Big.";
        assert!(matches!(
            parse_classification(response),
            Err(ClassifierError::Validation(_))
        ));
    }

    #[test]
    fn test_whitespace_reasoning_rejected() {
        let response = "Category: Builder\nCompany Size: Large\nReasoning:      ";
        assert!(matches!(
            parse_classification(response),
            Err(ClassifierError::Validation(_))
        ));
    }

    #[test]
    fn test_unrelated_colon_lines_ignored() {
        let response = "Note: searched the web\nCategory: Other\nCompany Size: Small\nReasoning: Industry association, not a target";
        let result = parse_classification(response).unwrap();
        assert_eq!(result.category(), Category::Other);
    }
}
