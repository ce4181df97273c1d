use std::sync::Arc;

use crate::config::Config;
use crate::extractor::TitleService;
use crate::fetcher::{HttpPageSource, UpstreamUrls};

#[derive(Clone)]
pub struct AppState {
    pub titles: Arc<TitleService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let source = HttpPageSource::from_config(config);
        let urls = UpstreamUrls::new(config.upstream_base_url().clone());
        Self::from_service(TitleService::new(Arc::new(source), urls))
    }

    pub fn from_service(service: TitleService) -> Self {
        Self {
            titles: Arc::new(service),
        }
    }
}
