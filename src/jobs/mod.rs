pub mod boards;
pub mod fetch;
pub mod filter;
pub mod params;
pub mod posting;

pub use params::{JobType, ScrapeParams, Site};
pub use posting::JobPosting;

use tracing::{info, warn};

use crate::error::Result;

/// Run one scrape across every selected board.
///
/// Boards run one after another; a failing board is logged and skipped so
/// the remaining boards still contribute rows. The combined rows are
/// relevance-filtered against the search term and deduplicated by
/// title + company.
pub async fn scrape_jobs(params: &ScrapeParams) -> Result<Vec<JobPosting>> {
    let mut all_jobs: Vec<JobPosting> = Vec::new();

    for site in &params.sites {
        let board = boards::board_for(*site);
        match board.scrape(params).await {
            Ok(rows) => {
                info!(board = board.name(), rows = rows.len(), "board scraped");
                all_jobs.extend(rows);
            }
            Err(err) => {
                warn!(board = board.name(), "board failed: {}", err);
            }
        }
    }

    let scraped = all_jobs.len();
    let filtered = filter::filter_by_relevance(all_jobs, &params.search_term);
    let unique = filter::dedup_jobs(filtered);
    info!(
        scraped,
        unique = unique.len(),
        "scrape finished"
    );

    Ok(unique)
}
