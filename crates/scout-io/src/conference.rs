//! Speaker listing scraper for the conference website

use crate::error::SourceError;
use crate::SpeakerSource;
use async_trait::async_trait;
use scout_domain::SpeakerRecord;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default speaker listing page
pub const DEFAULT_SPEAKERS_URL: &str = "https://www.digitalconstructionweek.com/all-speakers/";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const SPEAKER_SELECTOR: &str = ".speaker-grid-details";
const NAME_SELECTOR: &str = "h3";
const JOB_SELECTOR: &str = ".speaker-job";

/// Fetches the speaker listing page and extracts one record per speaker card
#[derive(Debug, Clone)]
pub struct ConferenceScraper {
    client: reqwest::Client,
    url: String,
}

impl ConferenceScraper {
    /// Create a scraper for `url`
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a scraper for [`DEFAULT_SPEAKERS_URL`]
    pub fn default_url() -> Result<Self, SourceError> {
        Self::new(DEFAULT_SPEAKERS_URL)
    }

    /// Page being scraped
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the page and parse every speaker on it
    pub async fn scrape(&self) -> Result<Vec<SpeakerRecord>, SourceError> {
        debug!(url = %self.url, "Fetching speaker page");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(url = %self.url, status = %status, "Speaker page request failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let html = response.text().await?;
        let speakers = parse_speakers(&html)?;
        info!(url = %self.url, speakers = speakers.len(), "Scraped speaker page");
        Ok(speakers)
    }
}

#[async_trait]
impl SpeakerSource for ConferenceScraper {
    async fn fetch(&self) -> Result<Vec<SpeakerRecord>, SourceError> {
        self.scrape().await
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Extract speakers from a listing page
///
/// Cards without a name are skipped. A card without job text yields empty
/// title and company.
pub fn parse_speakers(html: &str) -> Result<Vec<SpeakerRecord>, SourceError> {
    let card = selector(SPEAKER_SELECTOR)?;
    let name_selector = selector(NAME_SELECTOR)?;
    let job_selector = selector(JOB_SELECTOR)?;

    let document = Html::parse_document(html);
    let speakers = document
        .select(&card)
        .filter_map(|element| {
            let name = first_text(element, &name_selector);
            if name.is_empty() {
                return None;
            }
            let (title, company) = parse_job_text(&first_text(element, &job_selector));
            Some(SpeakerRecord::new(name, title, company))
        })
        .collect();

    Ok(speakers)
}

/// Split job text into `(title, company)`
///
/// Tries ` at `, then ` - `, then `, `, splitting on the first occurrence.
/// Without a separator the whole text is the title.
///
/// # Examples
///
/// ```
/// use scout_io::parse_job_text;
///
/// assert_eq!(
///     parse_job_text("Project Manager at ABC Construction"),
///     ("Project Manager".to_string(), "ABC Construction".to_string())
/// );
/// assert_eq!(parse_job_text("Consultant"), ("Consultant".to_string(), String::new()));
/// ```
pub fn parse_job_text(job_text: &str) -> (String, String) {
    let job_text = job_text.trim();
    for separator in [" at ", " - ", ", "] {
        if let Some((title, company)) = job_text.split_once(separator) {
            return (title.trim().to_string(), company.trim().to_string());
        }
    }
    (job_text.to_string(), String::new())
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
