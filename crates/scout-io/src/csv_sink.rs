//! CSV export of processed speakers

use crate::error::SinkError;
use scout_domain::traits::ResultSink;
use scout_domain::ProcessedSpeaker;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output columns, in order
pub const CSV_HEADERS: [&str; 6] = [
    "Speaker Name",
    "Speaker Title",
    "Speaker Company",
    "Company Category",
    "Email Subject",
    "Email Body",
];

/// Writes one UTF-8 CSV row per speaker, replacing the file on each write
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ResultSink for CsvSink {
    type Error = SinkError;

    fn write_all(&mut self, speakers: &[ProcessedSpeaker]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(CSV_HEADERS)?;
        for speaker in speakers {
            writer.write_record([
                speaker.name(),
                speaker.title(),
                speaker.company(),
                speaker.category().as_str(),
                speaker.email_subject(),
                speaker.email_body(),
            ])?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;

        info!(
            path = %self.path.display(),
            rows = speakers.len(),
            with_email = speakers.iter().filter(|s| s.has_email()).count(),
            "CSV exported"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::{Category, ClassificationResult, CompanySize, EmailContent, SpeakerRecord};

    fn speaker(
        name: &str,
        title: &str,
        company: &str,
        category: Category,
        size: CompanySize,
    ) -> ProcessedSpeaker {
        let classification =
            ClassificationResult::new(category, size, "Fixture reasoning for export").unwrap();
        ProcessedSpeaker::assemble(SpeakerRecord::new(name, title, company), classification, |r, _| {
            EmailContent::new(
                "See DroneDeploy at DCW Booth #42",
                format!("Hi {}, stop by our booth...", r.name),
            )
        })
    }

    fn sample() -> Vec<ProcessedSpeaker> {
        vec![
            speaker("John Smith", "Project Manager", "ABC Construction", Category::Builder, CompanySize::Large),
            speaker("Jane Doe", "CEO", "Tech Corp", Category::Partner, CompanySize::Large),
            speaker("Bob Builder", "Site Manager", "BuildCo", Category::Builder, CompanySize::Small),
        ]
    }

    fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn test_export_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email_list.csv");

        CsvSink::new(&path).write_all(&sample()).unwrap();

        let (headers, rows) = read_rows(&path);
        assert_eq!(headers, CSV_HEADERS);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0][..4],
            ["John Smith", "Project Manager", "ABC Construction", "Builder"]
        );
        assert_eq!(rows[0][4], "See DroneDeploy at DCW Booth #42");
        assert!(rows[0][5].contains("John"));
        assert_eq!(rows[1][3], "Partner");
        assert_eq!(rows[1][4], "");
        assert_eq!(rows[1][5], "");
        assert_eq!(rows[2][3], "Builder");
        assert_eq!(rows[2][4], "");
    }

    #[test]
    fn test_header_line_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email_list.csv");

        CsvSink::new(&path).write_all(&sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next().unwrap(),
            "Speaker Name,Speaker Title,Speaker Company,Company Category,Email Subject,Email Body"
        );
    }

    #[test]
    fn test_empty_input_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvSink::new(&path).write_all(&[]).unwrap();

        let (headers, rows) = read_rows(&path);
        assert_eq!(headers.len(), 6);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_dir").join("output.csv");

        let rows = vec![speaker("Test", "Manager", "TestCo", Category::Other, CompanySize::Unknown)];
        CsvSink::new(&path).write_all(&rows).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_utf8_and_multiline_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.csv");

        let rows = vec![speaker(
            "José García",
            "Directeur Général",
            "Société française",
            Category::Owner,
            CompanySize::Large,
        )];
        CsvSink::new(&path).write_all(&rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("José García"));
        assert!(content.contains("Société française"));

        let (_, parsed) = read_rows(&path);
        assert_eq!(parsed[0][5], "Hi José García, stop by our booth...");
    }

    #[test]
    fn test_rewrite_replaces_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email_list.csv");
        let mut sink = CsvSink::new(&path);

        sink.write_all(&sample()).unwrap();
        sink.write_all(&sample()[..1]).unwrap();

        let (_, rows) = read_rows(&path);
        assert_eq!(rows.len(), 1);
    }
}
