pub mod google;
pub mod indeed;
pub mod linkedin;
pub mod naukri;
pub mod remoteok;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use scraper::ElementRef;
use thiserror::Error;

use crate::jobs::params::{ScrapeParams, Site};
use crate::jobs::posting::JobPosting;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for BoardError {
    fn from(err: reqwest::Error) -> Self {
        BoardError::Network(err.to_string())
    }
}

/// One scrapeable job board.
#[async_trait]
pub trait JobBoard: Send + Sync {
    fn name(&self) -> &'static str;

    /// Collect up to `params.results_wanted` postings.
    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError>;
}

pub fn board_for(site: Site) -> Box<dyn JobBoard> {
    match site {
        Site::Linkedin => Box::new(linkedin::LinkedinBoard),
        Site::Indeed => Box::new(indeed::IndeedBoard),
        Site::Google => Box::new(google::GoogleBoard),
        Site::Naukri => Box::new(naukri::NaukriBoard),
        Site::RemoteOk => Box::new(remoteok::RemoteOkBoard),
    }
}

/// Joined, whitespace-normalized text of the first element matching
/// `selector`.
pub(crate) fn select_text(root: ElementRef<'_>, selector: &scraper::Selector) -> Option<String> {
    root.select(selector).next().map(element_text)
}

/// Text nodes joined with single spaces. Adjacent nodes get a separator so
/// `<p>a</p><p>b</p>` reads "a b", not "ab".
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, dash-separated form used in slug URLs.
pub(crate) fn slug(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse the "Posted 3 days ago" / "Today" / "30+ days ago" strings the
/// boards show instead of real dates.
pub(crate) fn parse_relative_date(text: &str) -> Option<NaiveDate> {
    let text = text.to_lowercase();
    let today = Utc::now().date_naive();

    if text.contains("today") || text.contains("just now") || text.contains("just posted") {
        return Some(today);
    }
    if text.contains("yesterday") {
        return Some(today - Duration::days(1));
    }

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let n: i64 = digits.parse().ok()?;

    if text.contains("hour") || text.contains("minute") {
        Some(today)
    } else if text.contains("day") {
        Some(today - Duration::days(n))
    } else if text.contains("week") {
        Some(today - Duration::days(n * 7))
    } else if text.contains("month") {
        Some(today - Duration::days(n * 30))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(slug("  Software  Engineer "), "software-engineer");
    }

    #[test]
    fn relative_dates_resolve_against_today() {
        let today = Utc::now().date_naive();
        assert_eq!(parse_relative_date("Just now"), Some(today));
        assert_eq!(parse_relative_date("Posted 11 hours ago"), Some(today));
        assert_eq!(
            parse_relative_date("PostedPosted 3 days ago"),
            Some(today - Duration::days(3))
        );
        assert_eq!(
            parse_relative_date("30+ days ago"),
            Some(today - Duration::days(30))
        );
        assert_eq!(parse_relative_date("recently"), None);
    }

    #[test]
    fn every_site_has_a_board() {
        for site in [
            Site::Linkedin,
            Site::Indeed,
            Site::Google,
            Site::Naukri,
            Site::RemoteOk,
        ] {
            assert_eq!(board_for(site).name(), site.to_string());
        }
    }
}
