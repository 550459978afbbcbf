use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::jobs::boards::{select_text, slug, BoardError, JobBoard};
use crate::jobs::fetch::{fetch_html, is_not_found};
use crate::jobs::params::ScrapeParams;
use crate::jobs::posting::JobPosting;

static ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.job").expect("Failed to parse row selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"h2[itemprop="title"], .company_and_position h2"#)
        .expect("Failed to parse title selector")
});
static COMPANY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"h3[itemprop="name"], .company h3"#).expect("Failed to parse company selector")
});
static LOCATION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".location").expect("Failed to parse location selector"));
static LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.preventLink").expect("Failed to parse link selector"));
static TIME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time").expect("Failed to parse time selector"));

pub struct RemoteOkBoard;

#[async_trait]
impl JobBoard for RemoteOkBoard {
    fn name(&self) -> &'static str {
        "remoteok"
    }

    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError> {
        let url = format!("https://remoteok.com/remote-{}-jobs", slug(&params.search_term));
        debug!(%url, "fetching remoteok listing page");

        let html = match fetch_html(&url).await {
            Ok(html) => html,
            // Unknown tags 404 rather than serving an empty board
            Err(err) if is_not_found(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        // The board is all-remote and has real timestamps, so the recency
        // window is applied here instead of in the query.
        let cutoff = Utc::now().date_naive()
            - Duration::days(i64::from((params.hours_old.max(1)).div_ceil(24)));

        let mut jobs = parse_listing(&html);
        jobs.retain(|job| job.date_posted.is_none_or(|date| date >= cutoff));
        jobs.truncate(params.results_wanted);
        Ok(jobs)
    }
}

fn parse_listing(html: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for row in document.select(&ROW) {
        let Some(title) = select_text(row, &TITLE).filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(company) = select_text(row, &COMPANY).filter(|c| !c.is_empty()) else {
            continue;
        };
        let location = select_text(row, &LOCATION)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "Remote".to_string());

        let href = row
            .value()
            .attr("data-href")
            .or_else(|| row.select(&LINK).next().and_then(|a| a.value().attr("href")))
            .unwrap_or_default();
        let job_url = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("https://remoteok.com{}", href)
        };

        let date_posted = row
            .select(&TIME)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .and_then(parse_timestamp);

        jobs.push(JobPosting {
            title,
            company,
            location,
            site: "remoteok",
            job_url,
            date_posted,
            description: None,
        });
    }

    jobs
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}
