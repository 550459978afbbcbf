use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::jobs::{JobPosting, ScrapeParams};

/// Longest description forwarded to clients, in characters.
const DESCRIPTION_LIMIT: usize = 500;

/// Incoming scrape parameters. Every field is optional on the wire, the
/// defaults below fill the gaps.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,
    #[serde(default = "default_search_term")]
    pub search_term: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default = "default_hours_old")]
    pub hours_old: u32,
    #[serde(default = "default_results_wanted")]
    pub results_wanted: usize,
    #[serde(default)]
    pub is_remote: Option<bool>,
}

fn default_sites() -> Vec<String> {
    vec![
        "linkedin".to_string(),
        "indeed".to_string(),
        "google".to_string(),
    ]
}

fn default_search_term() -> String {
    "software engineer".to_string()
}

fn default_location() -> String {
    "Hyderabad, India".to_string()
}

fn default_country() -> String {
    "India".to_string()
}

fn default_hours_old() -> u32 {
    72
}

fn default_results_wanted() -> usize {
    50
}

impl ScrapeRequest {
    pub fn into_params(self) -> Result<ScrapeParams> {
        ScrapeParams::build(
            &self.sites,
            self.search_term,
            self.location,
            self.country,
            &self.job_type,
            self.hours_old,
            self.results_wanted,
            self.is_remote,
        )
    }
}

/// One posting as the HTTP API serves it. Missing values become empty
/// strings rather than nulls.
#[derive(Debug, Serialize)]
pub struct JobJson {
    pub title: String,
    pub company: String,
    pub location: String,
    pub site: String,
    pub job_url: String,
    pub date_posted: String,
    pub description: String,
}

impl JobJson {
    pub fn from_posting(posting: &JobPosting) -> Self {
        JobJson {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            site: posting.site.to_string(),
            job_url: posting.job_url.clone(),
            date_posted: posting
                .date_posted
                .map(|d| d.to_string())
                .unwrap_or_default(),
            description: posting
                .description
                .as_deref()
                .map(|d| truncate_chars(d, DESCRIPTION_LIMIT))
                .unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<JobJson>,
}

/// Truncate to `max` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
