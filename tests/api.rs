use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rust_job_scraper::api::routes::create_router;
use rust_job_scraper::config::Config;
use rust_job_scraper::AppState;

fn test_state() -> AppState {
    AppState {
        config: Arc::new(Config {
            server_addr: "127.0.0.1:3000".parse().unwrap(),
            scrape_timeout: Duration::from_secs(300),
        }),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn preflight_gets_permissive_cors_headers() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/scrape")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn malformed_body_yields_error_envelope() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("parsing"));
}

#[tokio::test]
async fn unknown_site_yields_error_envelope() {
    let app = create_router(test_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"sites": ["monster"]}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Unknown site"));
}
