use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::jobs::boards::{select_text, BoardError, JobBoard};
use crate::jobs::fetch::fetch_html;
use crate::jobs::params::ScrapeParams;
use crate::jobs::posting::JobPosting;

// The jobs panel is embedded in the regular results page when the query
// carries the `ibp=htl;jobs` parameter. Class names rotate, so the
// selectors list every spelling seen in the wild.
static CARD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".PwjeAc, .iFjolb").expect("Failed to parse card selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#".BjJfJf, .sH3zFd, [role="heading"]"#).expect("Failed to parse title selector")
});
static COMPANY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".vNEEBe, .nJlQNd").expect("Failed to parse company selector"));
static LOCATION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".Qk80Jf, .pwO9Dc").expect("Failed to parse location selector"));

pub struct GoogleBoard;

#[async_trait]
impl JobBoard for GoogleBoard {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError> {
        let query = build_query(params);
        let url = format!(
            "https://www.google.com/search?q={}&ibp=htl;jobs",
            urlencoding::encode(&query)
        );
        debug!(%url, "fetching google jobs panel");
        let html = fetch_html(&url).await?;

        let mut jobs = parse_listing(&html, &params.location);
        jobs.truncate(params.results_wanted);
        Ok(jobs)
    }
}

fn build_query(params: &ScrapeParams) -> String {
    let mut query = params
        .google_search_term
        .clone()
        .unwrap_or_else(|| format!("{} jobs near {}", params.search_term, params.location));
    if params.is_remote == Some(true) {
        query.push_str(" remote");
    }
    if let Some(job_type) = params.job_type {
        query.push(' ');
        query.push_str(job_type.label());
    }
    query
}

fn parse_listing(html: &str, fallback_location: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&CARD) {
        let Some(title) = select_text(card, &TITLE).filter(|t| !t.is_empty()) else {
            continue;
        };
        let company = select_text(card, &COMPANY)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Various".to_string());
        let location = select_text(card, &LOCATION)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback_location.to_string());

        // No stable direct link in the panel, so point back at the panel
        // query for this exact posting.
        let job_url = format!(
            "https://www.google.com/search?q={}&ibp=htl;jobs",
            urlencoding::encode(&format!("{} {} jobs", title, company))
        );

        jobs.push(JobPosting {
            title,
            company,
            location,
            site: "google",
            job_url,
            date_posted: None,
            description: None,
        });
    }

    jobs
}
