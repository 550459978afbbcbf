//! One-shot scrape: JSON parameters on stdin, JSON result on stdout.
//!
//! Unlike the HTTP API the rows here carry no `description` field, and a
//! failure exits non-zero after printing the error document.

use std::io::Read;

use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use rust_job_scraper::api::models::ScrapeRequest;
use rust_job_scraper::error::Result;
use rust_job_scraper::jobs::{self, JobPosting};

#[derive(Serialize)]
struct CliJob {
    title: String,
    company: String,
    location: String,
    site: String,
    job_url: String,
    date_posted: String,
}

impl CliJob {
    fn from_posting(posting: &JobPosting) -> Self {
        CliJob {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            site: posting.site.to_string(),
            job_url: posting.job_url.clone(),
            date_posted: posting
                .date_posted
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Keep stdout clean for the result document, log to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(jobs) => {
            let out = json!({
                "success": true,
                "count": jobs.len(),
                "jobs": jobs,
            });
            println!("{}", out);
        }
        Err(err) => {
            let out = json!({
                "success": false,
                "error": err.to_string(),
            });
            println!("{}", out);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<Vec<CliJob>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| rust_job_scraper::error::AppError::ParseError(e.to_string()))?;

    let body = if input.trim().is_empty() { "{}" } else { input.as_str() };
    let request: ScrapeRequest = serde_json::from_str(body)?;

    let params = request.into_params()?;
    let postings = jobs::scrape_jobs(&params).await?;
    Ok(postings.iter().map(CliJob::from_posting).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn cli_rows_carry_no_description_field() {
        let posting = JobPosting {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            site: "linkedin",
            job_url: "https://example.com/1".to_string(),
            date_posted: NaiveDate::from_ymd_opt(2026, 8, 1),
            description: Some("long text".to_string()),
        };
        let value = serde_json::to_value(CliJob::from_posting(&posting)).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("description"));
        assert_eq!(obj["date_posted"], "2026-08-01");
    }
}
