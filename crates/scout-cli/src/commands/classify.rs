//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::build_provider;
use scout_classifier::{
    ClassificationClient, PipelineReport, PipelineRunner, PromptTemplate, TemplateDrafter,
};
use scout_domain::traits::ResultSink;
use scout_io::{CsvSink, JsonFileSource, SpeakerSource};
use scout_llm::LlmProvider;

/// Execute the classify command.
pub async fn execute_classify(
    args: ClassifyArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let provider = build_provider(config)?;
    classify_source(&JsonFileSource::new(args.input), provider, config, formatter).await?;
    Ok(())
}

/// Classify every speaker from `source`, export the CSV and print a summary.
pub async fn classify_source<P: LlmProvider>(
    source: &dyn SpeakerSource,
    provider: P,
    config: &Config,
    formatter: &Formatter,
) -> Result<PipelineReport> {
    let runner = build_runner(provider, config)?;
    let speakers = source.fetch().await?;

    println!(
        "{}",
        formatter.info(&format!(
            "Classifying {} speakers from {} with {}",
            speakers.len(),
            source.describe(),
            runner.classifier().provider().model_name()
        ))
    );
    let report = runner.run(speakers).await;

    let path = config.email_list_path();
    CsvSink::new(&path).write_all(&report.speakers)?;

    println!("{}", formatter.summary_table(&report));
    if !report.failures.is_empty() {
        println!("{}", formatter.failures(&report));
    }
    println!("{}", formatter.sample_emails(&report, config.settings.sample_emails));
    println!(
        "{}",
        formatter.success(&format!(
            "{} rows written to {}",
            report.speakers.len(),
            path.display()
        ))
    );

    Ok(report)
}

fn build_runner<P: LlmProvider>(
    provider: P,
    config: &Config,
) -> Result<PipelineRunner<P, TemplateDrafter>> {
    let mut client = ClassificationClient::new(provider, config.classifier.clone());
    if let Some(path) = &config.paths.prompt_template {
        client = client.with_prompt(PromptTemplate::from_file(path)?);
    }

    let drafter = match &config.paths.email_templates {
        Some(path) => TemplateDrafter::from_file(path)?,
        None => TemplateDrafter::builtin()?,
    };

    Ok(PipelineRunner::new(client, drafter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use scout_domain::{Category, SpeakerRecord};
    use scout_io::save_raw_speakers;
    use scout_llm::MockProvider;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.paths.output_dir = dir.to_path_buf();
        config.classifier.request_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_classify_source_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let input = dir.path().join("speakers.json");
        save_raw_speakers(
            &input,
            &[
                SpeakerRecord::new("Jane Doe", "Project Manager", "ABC Construction"),
                SpeakerRecord::new("John Roe", "CTO", "Tech Corp"),
                SpeakerRecord::new("No Company", "Consultant", ""),
            ],
        )
        .unwrap();

        let provider = MockProvider::new(
            "Category: Partner\nCompany Size: Large\nReasoning: Construction software vendor",
        )
        .with_response(
            "ABC Construction",
            "Category: Builder\nCompany Size: Large\nReasoning: General contractor, mid-size regional builder",
        );

        let report = classify_source(
            &JsonFileSource::new(&input),
            provider.clone(),
            &config,
            &Formatter::new(false),
        )
        .await
        .unwrap();

        assert_eq!(report.speakers.len(), 3);
        assert_eq!(report.speakers[0].category(), Category::Builder);
        assert_eq!(report.emails_generated(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(provider.call_count(), 2);

        let csv = std::fs::read_to_string(config.email_list_path()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Speaker Name,Speaker Title,Speaker Company,Company Category,Email Subject,Email Body"
        );
        assert!(csv.contains("Jane Doe,Project Manager,ABC Construction,Builder,"));
        assert!(csv.contains("John Roe,CTO,Tech Corp,Partner,,"));
        assert!(csv.contains("No Company,Consultant,,Other,,"));
    }

    #[tokio::test]
    async fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let result = classify_source(
            &JsonFileSource::new(dir.path().join("missing.json")),
            MockProvider::default(),
            &config,
            &Formatter::new(false),
        )
        .await;

        assert!(matches!(result, Err(CliError::Source(_))));
    }

    #[tokio::test]
    async fn test_custom_email_templates_must_be_valid() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        let templates = dir.path().join("templates.json");
        std::fs::write(&templates, r#"{"Builder": {"subject_templates": ["Hi"], "body_template": "Body"}}"#)
            .unwrap();
        config.paths.email_templates = Some(templates);

        let input = dir.path().join("speakers.json");
        save_raw_speakers(&input, &[]).unwrap();

        let result = classify_source(
            &JsonFileSource::new(&input),
            MockProvider::default(),
            &config,
            &Formatter::new(false),
        )
        .await;

        assert!(matches!(result, Err(CliError::Classifier(_))));
    }
}
