use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

use crate::jobs::boards::BoardError;

#[derive(Serialize)]
pub struct ErrorResponse {
    success: bool,
    error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        ErrorResponse { success: false, error }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Scrape error: {0}")]
    ScrapeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// Every failure surfaces as the same wire shape with a 500, the clients
// only branch on `success`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.to_string()));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        AppError::ScrapeError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_with_success_false() {
        let body = serde_json::to_value(ErrorResponse::new("boom".to_string())).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::ParseError(_)));
    }
}
