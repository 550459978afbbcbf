use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::jobs::boards::{element_text, select_text, BoardError, JobBoard};
use crate::jobs::fetch::fetch_html;
use crate::jobs::params::ScrapeParams;
use crate::jobs::posting::JobPosting;

// The guest listing endpoint serves 25 cards per page without auth.
const PAGE_SIZE: usize = 25;
const DETAIL_FETCH_DELAY: Duration = Duration::from_millis(200);

static CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.base-search-card").expect("Failed to parse card selector"));
static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3.base-search-card__title").expect("Failed to parse title selector"));
static COMPANY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h4.base-search-card__subtitle a, h4.base-search-card__subtitle")
        .expect("Failed to parse company selector")
});
static LOCATION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.job-search-card__location").expect("Failed to parse location selector")
});
static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.base-card__full-link").expect("Failed to parse link selector"));
static DATE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("time.job-search-card__listdate, time.job-search-card__listdate--new")
        .expect("Failed to parse date selector")
});
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.show-more-less-html__markup").expect("Failed to parse description selector")
});

pub struct LinkedinBoard;

#[async_trait]
impl JobBoard for LinkedinBoard {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError> {
        let wanted = params.results_wanted;
        let mut jobs: Vec<JobPosting> = Vec::new();
        let mut start = 0;

        while jobs.len() < wanted && start < wanted {
            let url = search_url(params, start);
            debug!(%url, "fetching linkedin listing page");
            let html = fetch_html(&url).await?;
            let page = parse_listing(&html);
            if page.is_empty() {
                break;
            }
            jobs.extend(page);
            start += PAGE_SIZE;
        }
        jobs.truncate(wanted);

        if params.linkedin_fetch_description {
            for job in &mut jobs {
                sleep(DETAIL_FETCH_DELAY).await;
                match fetch_html(&job.job_url).await {
                    Ok(html) => job.description = parse_description(&html),
                    Err(err) => warn!(url = %job.job_url, "description fetch failed: {}", err),
                }
            }
        }

        Ok(jobs)
    }
}

fn search_url(params: &ScrapeParams, start: usize) -> String {
    let mut url = format!(
        "https://www.linkedin.com/jobs-guest/jobs/api/seeJobPostings/search?keywords={}&location={}&f_TPR=r{}&start={}",
        urlencoding::encode(&params.search_term),
        urlencoding::encode(&params.location),
        params.hours_old as u64 * 3600,
        start,
    );
    if params.is_remote == Some(true) {
        url.push_str("&f_WT=2");
    }
    if let Some(job_type) = params.job_type {
        url.push_str("&f_JT=");
        url.push_str(job_type.linkedin_code());
    }
    url
}

fn parse_listing(html: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&CARD) {
        let Some(title) = select_text(card, &TITLE) else {
            continue;
        };
        let company = select_text(card, &COMPANY).unwrap_or_default();
        let location = select_text(card, &LOCATION).unwrap_or_default();

        let Some(job_url) = card
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        // Drop the tracking query string
        let job_url = job_url.split('?').next().unwrap_or(job_url).to_string();

        let date_posted = card
            .select(&DATE)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        jobs.push(JobPosting {
            title,
            company,
            location,
            site: "linkedin",
            job_url,
            date_posted,
            description: None,
        });
    }

    jobs
}

fn parse_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document.select(&DESCRIPTION).next().map(element_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::params::{JobType, Site};

    const LISTING: &str = r#"
        <ul>
          <li>
            <div class="base-card base-search-card">
              <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/rust-engineer-at-acme-42?refId=abc&trk=x"></a>
              <h3 class="base-search-card__title">Rust Engineer</h3>
              <h4 class="base-search-card__subtitle"><a>Acme Corp</a></h4>
              <span class="job-search-card__location">Hyderabad, India</span>
              <time class="job-search-card__listdate" datetime="2026-08-01">5 days ago</time>
            </div>
          </li>
          <li>
            <div class="base-search-card">
              <h3 class="base-search-card__title">No Link Card</h3>
            </div>
          </li>
        </ul>"#;

    #[test]
    fn listing_cards_map_to_postings() {
        let jobs = parse_listing(LISTING);
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Rust Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.location, "Hyderabad, India");
        assert_eq!(job.site, "linkedin");
        assert_eq!(
            job.job_url,
            "https://www.linkedin.com/jobs/view/rust-engineer-at-acme-42"
        );
        assert_eq!(
            job.date_posted,
            NaiveDate::from_ymd_opt(2026, 8, 1)
        );
        assert!(job.description.is_none());
    }

    #[test]
    fn description_markup_is_flattened() {
        let html = r#"<div class="show-more-less-html__markup">
            <p>Build   services.</p><ul><li>Rust</li></ul></div>"#;
        assert_eq!(
            parse_description(html).as_deref(),
            Some("Build services. Rust")
        );
    }

    #[test]
    fn search_url_carries_the_optional_filters() {
        let params = ScrapeParams {
            sites: vec![Site::Linkedin],
            search_term: "rust dev".to_string(),
            location: "Berlin".to_string(),
            country: "Germany".to_string(),
            results_wanted: 10,
            hours_old: 72,
            is_remote: Some(true),
            job_type: Some(JobType::FullTime),
            google_search_term: None,
            linkedin_fetch_description: true,
        };
        let url = search_url(&params, 25);
        assert!(url.contains("keywords=rust%20dev"));
        assert!(url.contains("f_TPR=r259200"));
        assert!(url.contains("start=25"));
        assert!(url.contains("&f_WT=2"));
        assert!(url.contains("&f_JT=F"));

        let mut params = params;
        params.is_remote = None;
        params.job_type = None;
        let url = search_url(&params, 0);
        assert!(!url.contains("f_WT"));
        assert!(!url.contains("f_JT"));
    }
}
