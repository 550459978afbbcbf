use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder, StatusCode};
use tokio::time::sleep;
use tracing::warn;

use crate::jobs::boards::BoardError;

const RETRIES: u32 = 2;
const BACKOFF_STEP_MS: u64 = 500;

// Create a static client to reuse connections. Job boards refuse obviously
// non-browser traffic, so the default headers mimic a desktop Chrome.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .default_headers(headers)
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetch a page, retrying transient failures with a growing backoff.
pub async fn fetch_html(url: &str) -> Result<String, BoardError> {
    let mut attempt = 0;
    loop {
        match try_fetch(url).await {
            Ok(body) => return Ok(body),
            Err(err) if attempt < RETRIES => {
                warn!(url, attempt, "fetch failed, retrying: {}", err);
                sleep(Duration::from_millis(BACKOFF_STEP_MS * (attempt as u64 + 1))).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn try_fetch(url: &str) -> Result<String, BoardError> {
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BoardError::Status(status));
    }
    Ok(response.text().await?)
}

/// A 404 from a slug-style search URL just means "no such listing page".
pub fn is_not_found(err: &BoardError) -> bool {
    matches!(err, BoardError::Status(StatusCode::NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recognized() {
        assert!(is_not_found(&BoardError::Status(StatusCode::NOT_FOUND)));
        assert!(!is_not_found(&BoardError::Status(StatusCode::FORBIDDEN)));
        assert!(!is_not_found(&BoardError::Parse("x".to_string())));
    }
}
