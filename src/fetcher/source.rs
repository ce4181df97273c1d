use async_trait::async_trait;
use tracing::{instrument, warn};
use url::Url;

use crate::config::Config;
use crate::fetcher::{backoff::calculate_backoff_delay, client::fetch, errors::FetchError};

/// Where raw documents come from. The extraction core only sees markup
/// strings handed over by an implementation of this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds upstream locations for title pages and episode fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    base: Url,
}

impl UpstreamUrls {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// `{base}/title/{id}`
    pub fn title(&self, id: &str) -> Url {
        self.with_segments(&["title", id])
    }

    /// `{base}/title/{id}/episodes/_ajax`, optionally pinned to one season.
    /// Without a season the upstream picks its default listing.
    pub fn episodes(&self, id: &str, season_id: Option<&str>) -> Url {
        let mut url = self.with_segments(&["title", id, "episodes", "_ajax"]);
        if let Some(season_id) = season_id {
            url.query_pairs_mut().append_pair("season", season_id);
        }
        url
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `Config` only accepts bases that can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// `PageSource` backed by the shared reqwest client, retrying transient
/// failures with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpPageSource {
    pub fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fetch_max_retries(), config.fetch_backoff_base_ms())
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match fetch(url.as_str()).await {
                Ok(response) => return Ok(response.into_body()),
                Err(err) if err.should_retry() && attempt < self.max_retries => {
                    let delay = calculate_backoff_delay(attempt, self.backoff_base_ms);
                    warn!(
                        "Fetch attempt {} failed: {}; retrying in {}ms",
                        attempt + 1,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
