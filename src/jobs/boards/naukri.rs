use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::jobs::boards::{element_text, parse_relative_date, select_text, slug, BoardError, JobBoard};
use crate::jobs::fetch::{fetch_html, is_not_found};
use crate::jobs::params::ScrapeParams;
use crate::jobs::posting::JobPosting;

static CARD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".srp-jobtuple-wrapper, .jobTuple, article.jobTuple")
        .expect("Failed to parse card selector")
});
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.title, .title").expect("Failed to parse title selector"));
static COMPANY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".comp-name, .companyInfo a, .subTitle").expect("Failed to parse company selector")
});
static LOCATION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".locWdth, .location, .loc-wrap").expect("Failed to parse location selector")
});
static DATE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".job-post-day, .type br + span").expect("Failed to parse date selector")
});

pub struct NaukriBoard;

#[async_trait]
impl JobBoard for NaukriBoard {
    fn name(&self) -> &'static str {
        "naukri"
    }

    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError> {
        let url = format!(
            "https://www.naukri.com/{}-jobs-in-{}?jobAge={}",
            slug(&params.search_term),
            slug(&params.location),
            (params.hours_old.max(1)).div_ceil(24),
        );
        debug!(%url, "fetching naukri listing page");

        let html = match fetch_html(&url).await {
            Ok(html) => html,
            // A term/location combination with no listings 404s
            Err(err) if is_not_found(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        let mut jobs = parse_listing(&html, &params.location);
        jobs.truncate(params.results_wanted);
        Ok(jobs)
    }
}

fn parse_listing(html: &str, fallback_location: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&CARD) {
        let Some(link) = card.select(&TITLE_LINK).next() else {
            continue;
        };
        let title = element_text(link);
        let Some(job_url) = link.value().attr("href") else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let company = select_text(card, &COMPANY)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let location = select_text(card, &LOCATION)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback_location.to_string());
        let date_posted = select_text(card, &DATE).and_then(|text| parse_relative_date(&text));

        jobs.push(JobPosting {
            title,
            company,
            location,
            site: "naukri",
            job_url: job_url.to_string(),
            date_posted,
            description: None,
        });
    }

    jobs
}
