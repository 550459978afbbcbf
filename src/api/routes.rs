use axum::{
    routing::post,
    Router,
    extract::State,
    response::{IntoResponse, Response},
    http::StatusCode,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::api::models::{JobJson, ScrapeRequest};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::jobs;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/scrape", post(scrape_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn scrape_handler(State(state): State<AppState>, body: String) -> Response {
    let start_time = std::time::Instant::now();

    // Cap the whole request so one stuck board cannot hold the handler open
    let result = tokio::time::timeout(
        state.config.scrape_timeout,
        process_scrape_request(&body),
    )
    .await;

    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(jobs)) => {
            info!(count = jobs.len(), ?elapsed, "scrape request served");
            response::success(jobs).into_response()
        }
        Ok(Err(err)) => {
            error!(?elapsed, "scrape request failed: {}", err);
            err.into_response()
        }
        Err(_) => {
            error!(?elapsed, "scrape request timed out");
            response::error(
                StatusCode::GATEWAY_TIMEOUT,
                format!(
                    "Request timeout ({} seconds)",
                    state.config.scrape_timeout.as_secs()
                ),
            )
            .into_response()
        }
    }
}

async fn process_scrape_request(body: &str) -> Result<Vec<JobJson>> {
    // An empty body means "use every default", matching a bare POST
    let body = if body.trim().is_empty() { "{}" } else { body };
    let request: ScrapeRequest =
        serde_json::from_str(body).map_err(|e| AppError::ParseError(e.to_string()))?;

    let params = request.into_params()?;
    info!(
        search_term = %params.search_term,
        location = %params.location,
        sites = params.sites.len(),
        "processing scrape request"
    );

    let postings = jobs::scrape_jobs(&params).await?;
    Ok(postings.iter().map(JobJson::from_posting).collect())
}
