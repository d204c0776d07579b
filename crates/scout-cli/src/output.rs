//! Output formatting for the CLI.

use colored::*;
use scout_classifier::PipelineReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const PREVIEW_CHARS: usize = 100;

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format the per-category summary of a run.
    pub fn summary_table(&self, report: &PipelineReport) -> String {
        if report.speakers.is_empty() {
            return self.colorize("No speakers processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Category", "Speakers"]);
        for (category, count) in report.category_counts() {
            builder.push_record([category.to_string(), count.to_string()]);
        }
        builder.push_record(["Emails generated".to_string(), report.emails_generated().to_string()]);
        builder.push_record(["Failed".to_string(), report.failures.len().to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format up to `limit` speakers that received an email.
    pub fn sample_emails(&self, report: &PipelineReport, limit: usize) -> String {
        let samples: Vec<String> = report
            .speakers
            .iter()
            .filter(|s| s.has_email())
            .take(limit)
            .enumerate()
            .map(|(i, speaker)| {
                let heading = format!("{}. {} ({})", i + 1, speaker.name(), speaker.category());
                format!(
                    "{}\n   Subject: {}\n   Body Preview: {}",
                    self.colorize(&heading, "cyan"),
                    speaker.email_subject(),
                    preview(speaker.email_body())
                )
            })
            .collect();

        if samples.is_empty() {
            return self.info("No emails generated.");
        }
        samples.join("\n\n")
    }

    /// Format the failed speakers of a run, one per line.
    pub fn failures(&self, report: &PipelineReport) -> String {
        report
            .failures
            .iter()
            .map(|f| self.warning(&format!("{}: {}", f.name, f.error)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn preview(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
