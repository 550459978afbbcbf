use chrono::NaiveDate;

/// One job posting as it comes off a board, before either entry point
/// reshapes it for the wire.
#[derive(Debug, Clone)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub site: &'static str,
    pub job_url: String,
    pub date_posted: Option<NaiveDate>,
    pub description: Option<String>,
}
