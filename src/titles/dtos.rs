use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::compose::CANONICAL_BASE;
use crate::extractor::{EpisodeRecord, SeasonFragmentResult, SeasonRef};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeasonResponse {
    pub id: String,
    pub title_api_path: String,
    pub imdb: String,
    pub season_id: String,
    pub episodes: Vec<EpisodeRecord>,
    pub all_seasons: Vec<SeasonRef>,
}

impl SeasonResponse {
    pub fn new(id: &str, season_id: &str, fragment: SeasonFragmentResult) -> Self {
        Self {
            id: id.to_string(),
            title_api_path: format!("/title/{}", id),
            imdb: format!("{}/title/{}/episodes?season={}", CANONICAL_BASE, id, season_id),
            season_id: season_id.to_string(),
            episodes: fragment.episodes,
            all_seasons: fragment.all_seasons,
        }
    }
}
