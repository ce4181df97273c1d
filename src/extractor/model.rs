use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::defaults::{
    COUNT_DEFAULT, DATE_PART_UNKNOWN, RATING_DEFAULT, SERIES_MARKER,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub count: u64,
    pub star: f64,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            count: COUNT_DEFAULT,
            star: RATING_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Award {
    /// Award line as shown on the page, e.g. "Won 4 Oscars 157 wins & 220 nominations total".
    pub summary: String,
    pub wins: u64,
    pub nominations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub country: String,
    /// ISO 3166-1 alpha-2 code, empty when unknown.
    pub cca2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetailed {
    /// `YYYY-MM-DD` when the full date is known, empty otherwise.
    pub date: String,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub release_location: Location,
    pub origin_locations: Vec<Location>,
}

impl Default for ReleaseDetailed {
    fn default() -> Self {
        Self {
            date: String::new(),
            day: DATE_PART_UNKNOWN,
            month: DATE_PART_UNKNOWN,
            year: DATE_PART_UNKNOWN,
            release_location: Location::default(),
            origin_locations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpokenLanguage {
    pub language: String,
    /// Language code taken from the search link, e.g. "en".
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TopCredit {
    /// Role label, e.g. "Director" or "Stars".
    pub name: String,
    pub value: Vec<String>,
}

/// Fields read from the JSON-LD block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredMetadata {
    pub content_type: String,
    pub image: String,
    pub plot: String,
    pub rating: Rating,
    pub content_rating: String,
    pub genre: Vec<String>,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
}

/// Fields only recoverable from the page markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupDetails {
    pub title: String,
    pub original_title: String,
    pub production_status: String,
    pub images: Vec<String>,
    pub award: Award,
    pub release_detailed: ReleaseDetailed,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub filming_locations: Vec<String>,
    /// Display form, e.g. "2h 28m".
    pub runtime: String,
    pub runtime_seconds: u64,
    #[serde(rename = "top_credits")]
    pub top_credits: Vec<TopCredit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EpisodeRecord {
    pub id: String,
    /// Season number, -1 when the season id is not numeric.
    pub season: i32,
    /// Episode number within the season, -1 when missing.
    pub episode: i32,
    pub title: String,
    pub image: String,
    pub plot: String,
    /// Air date as printed, e.g. "20 Jan. 2008".
    pub air_date: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeasonRef {
    pub id: String,
    pub name: String,
    pub api_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeasonFragmentResult {
    pub episodes: Vec<EpisodeRecord>,
    pub all_seasons: Vec<SeasonRef>,
}

/// Normalized title record returned to callers.
///
/// All fields are always present. `year` is `null` when unknown; `seasons`
/// (episodes of the default season) and `all_seasons` only exist on series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    pub id: String,
    #[serde(rename = "review_api_path")]
    pub review_api_path: String,
    pub imdb: String,
    pub content_type: String,
    pub production_status: String,
    pub title: String,
    pub original_title: String,
    pub image: String,
    pub images: Vec<String>,
    pub plot: String,
    pub rating: Rating,
    pub award: Award,
    pub content_rating: String,
    pub genre: Vec<String>,
    pub release_detailed: ReleaseDetailed,
    pub year: Option<i32>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub filming_locations: Vec<String>,
    pub runtime: String,
    pub runtime_seconds: u64,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    #[serde(rename = "top_credits")]
    pub top_credits: Vec<TopCredit>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seasons: Option<Vec<EpisodeRecord>>,
    #[serde(
        rename = "all_seasons",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub all_seasons: Option<Vec<SeasonRef>>,
}

impl TitleRecord {
    pub fn is_series(&self) -> bool {
        self.content_type == SERIES_MARKER
    }

    /// Fill `year` from the release details unless it is already set or the
    /// release year is unknown.
    pub fn backfill_year(&mut self) {
        if self.year.is_none() && self.release_detailed.year != DATE_PART_UNKNOWN {
            self.year = Some(self.release_detailed.year);
        }
    }

    pub fn attach_seasons(&mut self, fragment: SeasonFragmentResult) {
        self.seasons = Some(fragment.episodes);
        self.all_seasons = Some(fragment.all_seasons);
    }
}
