use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::jobs::boards::{parse_relative_date, select_text, BoardError, JobBoard};
use crate::jobs::fetch::fetch_html;
use crate::jobs::params::ScrapeParams;
use crate::jobs::posting::JobPosting;

const PAGE_SIZE: usize = 10;

static CARD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".job_seen_beacon, .jobsearch-ResultsList > li, .result")
        .expect("Failed to parse card selector")
});
static TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2.jobTitle span, .jobTitle, a[data-jk]").expect("Failed to parse title selector")
});
static COMPANY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="company-name"], .companyName, .company"#)
        .expect("Failed to parse company selector")
});
static LOCATION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="text-location"], .companyLocation, .location"#)
        .expect("Failed to parse location selector")
});
static JOB_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[data-jk]").expect("Failed to parse link selector"));
static SNIPPET: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".job-snippet").expect("Failed to parse snippet selector"));
static DATE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[data-testid="myJobsStateDate"], span.date"#)
        .expect("Failed to parse date selector")
});

pub struct IndeedBoard;

#[async_trait]
impl JobBoard for IndeedBoard {
    fn name(&self) -> &'static str {
        "indeed"
    }

    async fn scrape(&self, params: &ScrapeParams) -> Result<Vec<JobPosting>, BoardError> {
        let domain = domain_for_country(&params.country);
        let wanted = params.results_wanted;
        let mut jobs: Vec<JobPosting> = Vec::new();
        let mut start = 0;

        while jobs.len() < wanted && start < wanted {
            let url = search_url(params, domain, start);
            debug!(%url, "fetching indeed listing page");
            let html = fetch_html(&url).await?;
            let page = parse_listing(&html, domain, &params.location);
            if page.is_empty() {
                break;
            }
            jobs.extend(page);
            start += PAGE_SIZE;
        }
        jobs.truncate(wanted);

        Ok(jobs)
    }
}

/// Indeed runs one domain per country; unknown countries land on the
/// international `www` domain.
fn domain_for_country(country: &str) -> &'static str {
    match country.trim().to_lowercase().as_str() {
        "usa" | "us" | "united states" => "www.indeed.com",
        "india" => "in.indeed.com",
        "uk" | "united kingdom" => "uk.indeed.com",
        "canada" => "ca.indeed.com",
        "australia" => "au.indeed.com",
        "germany" => "de.indeed.com",
        "france" => "fr.indeed.com",
        "netherlands" => "nl.indeed.com",
        "ireland" => "ie.indeed.com",
        "singapore" => "sg.indeed.com",
        "uae" | "united arab emirates" => "ae.indeed.com",
        "new zealand" => "nz.indeed.com",
        "south africa" => "za.indeed.com",
        "spain" => "es.indeed.com",
        "italy" => "it.indeed.com",
        "brazil" => "br.indeed.com",
        "mexico" => "mx.indeed.com",
        "japan" => "jp.indeed.com",
        _ => "www.indeed.com",
    }
}

/// Map an hour window onto the `fromage` day buckets Indeed accepts.
fn fromage_days(hours_old: u32) -> u32 {
    match hours_old {
        0..=24 => 1,
        25..=72 => 3,
        73..=168 => 7,
        _ => 14,
    }
}

fn search_url(params: &ScrapeParams, domain: &str, start: usize) -> String {
    let mut url = format!(
        "https://{}/jobs?q={}&l={}&fromage={}&start={}",
        domain,
        urlencoding::encode(&params.search_term),
        urlencoding::encode(&params.location),
        fromage_days(params.hours_old),
        start,
    );

    // Remote and job-type land in the combined `sc` filter attribute
    let mut sc = String::new();
    if params.is_remote == Some(true) {
        sc.push_str("attr(DSQF7)");
    }
    if let Some(job_type) = params.job_type {
        sc.push_str(&format!("jt({})", job_type.indeed_attr()));
    }
    if !sc.is_empty() {
        url.push_str("&sc=");
        url.push_str(&urlencoding::encode(&format!("0kf:{};", sc)));
    }

    url
}

fn parse_listing(html: &str, domain: &str, fallback_location: &str) -> Vec<JobPosting> {
    let document = Html::parse_document(html);
    let mut jobs = Vec::new();

    for card in document.select(&CARD) {
        let Some(title) = select_text(card, &TITLE).filter(|t| !t.is_empty()) else {
            continue;
        };

        let job_key = card
            .select(&JOB_LINK)
            .next()
            .and_then(|a| a.value().attr("data-jk"))
            .or_else(|| card.value().attr("data-jk"));
        let Some(job_key) = job_key else {
            continue;
        };

        let company = select_text(card, &COMPANY)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let location = select_text(card, &LOCATION)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback_location.to_string());
        let date_posted =
            select_text(card, &DATE).and_then(|text| parse_relative_date(&text));
        let description = select_text(card, &SNIPPET).filter(|s| !s.is_empty());

        jobs.push(JobPosting {
            title,
            company,
            location,
            site: "indeed",
            job_url: format!("https://{}/viewjob?jk={}", domain, job_key),
            date_posted,
            description,
        });
    }

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::params::{JobType, Site};
    use chrono::{Duration, Utc};

    const LISTING: &str = r#"
        <div class="job_seen_beacon">
          <h2 class="jobTitle"><a data-jk="abc123"><span>Backend Developer</span></a></h2>
          <span data-testid="company-name">Initech</span>
          <div data-testid="text-location">Bengaluru, Karnataka</div>
          <div class="job-snippet">Own services end to end.</div>
          <span data-testid="myJobsStateDate">Posted 3 days ago</span>
        </div>
        <div class="job_seen_beacon">
          <h2 class="jobTitle"><span>No Key Job</span></h2>
        </div>"#;

    #[test]
    fn listing_cards_map_to_postings() {
        let jobs = parse_listing(LISTING, "in.indeed.com", "Hyderabad, India");
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Backend Developer");
        assert_eq!(job.company, "Initech");
        assert_eq!(job.location, "Bengaluru, Karnataka");
        assert_eq!(job.job_url, "https://in.indeed.com/viewjob?jk=abc123");
        assert_eq!(
            job.date_posted,
            Some(Utc::now().date_naive() - Duration::days(3))
        );
        assert_eq!(job.description.as_deref(), Some("Own services end to end."));
    }

    #[test]
    fn missing_company_and_location_fall_back() {
        let html = r#"
            <div class="job_seen_beacon">
              <h2 class="jobTitle"><a data-jk="k1"><span>Dev</span></a></h2>
            </div>"#;
        let jobs = parse_listing(html, "www.indeed.com", "Remote");
        assert_eq!(jobs[0].company, "Unknown");
        assert_eq!(jobs[0].location, "Remote");
    }

    #[test]
    fn country_picks_the_regional_domain() {
        assert_eq!(domain_for_country("India"), "in.indeed.com");
        assert_eq!(domain_for_country("United Kingdom"), "uk.indeed.com");
        assert_eq!(domain_for_country("Atlantis"), "www.indeed.com");
    }

    #[test]
    fn hours_map_to_fromage_buckets() {
        assert_eq!(fromage_days(24), 1);
        assert_eq!(fromage_days(72), 3);
        assert_eq!(fromage_days(168), 7);
        assert_eq!(fromage_days(720), 14);
    }

    #[test]
    fn filters_ride_in_the_sc_parameter() {
        let params = ScrapeParams {
            sites: vec![Site::Indeed],
            search_term: "rust".to_string(),
            location: "Remote".to_string(),
            country: "USA".to_string(),
            results_wanted: 10,
            hours_old: 72,
            is_remote: Some(true),
            job_type: Some(JobType::Contract),
            google_search_term: None,
            linkedin_fetch_description: true,
        };
        let url = search_url(&params, "www.indeed.com", 0);
        assert!(url.contains("fromage=3"));
        assert!(url.contains(&urlencoding::encode("0kf:attr(DSQF7)jt(contract);").into_owned()));

        let mut params = params;
        params.is_remote = None;
        params.job_type = None;
        assert!(!search_url(&params, "www.indeed.com", 0).contains("&sc="));
    }
}
