use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use reqwest::StatusCode;
use url::Url;

/// A fetched upstream document, already decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub encoding: &'static Encoding,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl PageResponse {
    pub fn into_body(self) -> String {
        self.body
    }
}
