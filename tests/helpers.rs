use axum::{Router, body::Body, http::Request, response::Response};
use std::fs;
use url::Url;

use marquee::{app::app, app_state::AppState, config::Config};

/// Application wired to an upstream at `upstream_uri`, without retries.
pub fn test_app(upstream_uri: &str) -> Router {
    let upstream = Url::parse(upstream_uri).expect("Invalid upstream uri");
    let config = Config::new("127.0.0.1:0", upstream).with_retries(0, 1);
    app(AppState::new(&config))
}

pub fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{}", name))
        .expect("Failed to read test fixture")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
