use axum::http::StatusCode;
use axum::Json;

use crate::api::models::{JobJson, ScrapeResponse};
use crate::error::ErrorResponse;

pub fn success(jobs: Vec<JobJson>) -> (StatusCode, Json<ScrapeResponse>) {
    let count = jobs.len();
    (
        StatusCode::OK,
        Json(ScrapeResponse {
            success: true,
            count,
            jobs,
        }),
    )
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(message)))
}
