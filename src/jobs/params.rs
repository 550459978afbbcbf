use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Job boards the scraper knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Linkedin,
    Indeed,
    Google,
    Naukri,
    RemoteOk,
}

impl FromStr for Site {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Site::Linkedin),
            "indeed" => Ok(Site::Indeed),
            "google" => Ok(Site::Google),
            "naukri" => Ok(Site::Naukri),
            "remoteok" | "remote_ok" => Ok(Site::RemoteOk),
            other => Err(AppError::ScrapeError(format!("Unknown site: {}", other))),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Site::Linkedin => "linkedin",
            Site::Indeed => "indeed",
            Site::Google => "google",
            Site::Naukri => "naukri",
            Site::RemoteOk => "remoteok",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
}

impl FromStr for JobType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        // Accept the spellings job boards themselves use
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "fulltime" => Ok(JobType::FullTime),
            "parttime" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "temporary" => Ok(JobType::Temporary),
            "internship" => Ok(JobType::Internship),
            other => Err(AppError::ScrapeError(format!("Unknown job type: {}", other))),
        }
    }
}

impl JobType {
    /// LinkedIn `f_JT` filter code.
    pub fn linkedin_code(&self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::PartTime => "P",
            JobType::Contract => "C",
            JobType::Temporary => "T",
            JobType::Internship => "I",
        }
    }

    /// Indeed `sc` attribute value.
    pub fn indeed_attr(&self) -> &'static str {
        match self {
            JobType::FullTime => "fulltime",
            JobType::PartTime => "parttime",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Internship => "internship",
        }
    }

    /// Human label, used when the term has to ride inside a search query.
    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Internship => "internship",
        }
    }
}

/// Everything one scrape run needs. Built once per request from the raw
/// input, defaults already applied.
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    pub sites: Vec<Site>,
    pub search_term: String,
    pub location: String,
    pub country: String,
    pub results_wanted: usize,
    pub hours_old: u32,
    pub is_remote: Option<bool>,
    pub job_type: Option<JobType>,
    /// Derived query for the Google Jobs board, present only when that
    /// board is selected.
    pub google_search_term: Option<String>,
    pub linkedin_fetch_description: bool,
}

impl ScrapeParams {
    pub fn build(
        sites: &[String],
        search_term: String,
        location: String,
        country: String,
        job_type: &str,
        hours_old: u32,
        results_wanted: usize,
        is_remote: Option<bool>,
    ) -> Result<Self> {
        if sites.is_empty() {
            return Err(AppError::ScrapeError("No sites selected".to_string()));
        }

        let sites = sites
            .iter()
            .map(|s| s.parse::<Site>())
            .collect::<Result<Vec<_>>>()?;

        let job_type = if job_type.is_empty() {
            None
        } else {
            Some(job_type.parse::<JobType>()?)
        };

        let google_search_term = sites
            .contains(&Site::Google)
            .then(|| format!("{} jobs near {}", search_term, location));

        Ok(ScrapeParams {
            sites,
            search_term,
            location,
            country,
            results_wanted,
            hours_old,
            is_remote,
            job_type,
            google_search_term,
            linkedin_fetch_description: true,
        })
    }
}
