use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::document::Document;
use crate::extractor::episodes::{extract_default_season, extract_season_episodes};
use crate::extractor::errors::ExtractError;
use crate::extractor::model::{
    MarkupDetails, SeasonFragmentResult, StructuredMetadata, TitleRecord,
};
use crate::extractor::more_info::extract_details;
use crate::extractor::schema::extract_structured;
use crate::fetcher::{PageSource, UpstreamUrls};

/// Public origin used for the `imdb` link in records, independent of where
/// pages are actually fetched from.
pub const CANONICAL_BASE: &str = "https://www.imdb.com";

/// Identity fields of a title record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub review_api_path: String,
    pub imdb: String,
}

impl Identity {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            review_api_path: format!("/reviews/{}", id),
            imdb: format!("{}/title/{}", CANONICAL_BASE, id),
        }
    }
}

/// Assemble a record from the identity and the two extraction views. Each
/// output field has exactly one source.
pub fn compose(
    identity: Identity,
    structured: StructuredMetadata,
    details: MarkupDetails,
) -> TitleRecord {
    let mut record = TitleRecord {
        id: identity.id,
        review_api_path: identity.review_api_path,
        imdb: identity.imdb,

        content_type: structured.content_type,
        image: structured.image,
        plot: structured.plot,
        rating: structured.rating,
        content_rating: structured.content_rating,
        genre: structured.genre,
        actors: structured.actors,
        directors: structured.directors,

        title: details.title,
        original_title: details.original_title,
        production_status: details.production_status,
        images: details.images,
        award: details.award,
        release_detailed: details.release_detailed,
        spoken_languages: details.spoken_languages,
        filming_locations: details.filming_locations,
        runtime: details.runtime,
        runtime_seconds: details.runtime_seconds,
        top_credits: details.top_credits,

        year: None,
        seasons: None,
        all_seasons: None,
    };
    record.backfill_year();
    record
}

/// Extract a title record from a fetched title page, without season data.
#[instrument(skip(raw), fields(bytes = raw.len()))]
pub fn extract_title(id: &str, raw: &str) -> Result<TitleRecord, ExtractError> {
    let doc = Document::parse(raw)?;
    let structured = extract_structured(&doc)?;
    let details = extract_details(&doc);
    Ok(compose(Identity::new(id), structured, details))
}

/// Fetches pages through a [`PageSource`] and runs the extraction pipeline.
#[derive(Clone)]
pub struct TitleService {
    source: Arc<dyn PageSource>,
    urls: UpstreamUrls,
}

impl TitleService {
    pub fn new(source: Arc<dyn PageSource>, urls: UpstreamUrls) -> Self {
        Self { source, urls }
    }

    /// Full title record. Series additionally get their default season's
    /// episodes and the list of all seasons; failing to load those fails the
    /// whole request.
    #[instrument(skip(self))]
    pub async fn title(&self, id: &str) -> Result<TitleRecord, ExtractError> {
        let raw = self.source.fetch_page(&self.urls.title(id)).await?;
        let mut record = extract_title(id, &raw).inspect_err(|e| {
            warn!("Title extraction failed: {}", e);
        })?;

        if record.is_series() {
            let fragment = self
                .source
                .fetch_page(&self.urls.episodes(id, None))
                .await
                .map_err(ExtractError::SeasonData)?;
            let (season_id, seasons) = extract_default_season(id, &fragment);
            debug!(
                season_id = %season_id,
                episodes = seasons.episodes.len(),
                "attached default season"
            );
            record.attach_seasons(seasons);
        }

        info!(content_type = %record.content_type, "extracted title");
        Ok(record)
    }

    /// Episodes of one season and the list of all seasons.
    #[instrument(skip(self))]
    pub async fn season(
        &self,
        id: &str,
        season_id: &str,
    ) -> Result<SeasonFragmentResult, ExtractError> {
        let raw = self
            .source
            .fetch_page(&self.urls.episodes(id, Some(season_id)))
            .await?;
        Ok(extract_season_episodes(id, season_id, &raw))
    }
}
