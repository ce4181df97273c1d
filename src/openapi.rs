use axum::Json;
use utoipa::OpenApi;

use crate::extractor::{
    Award, EpisodeRecord, Location, Rating, ReleaseDetailed, SeasonRef, SpokenLanguage,
    TitleRecord, TopCredit,
};
use crate::health::HealthResponse;
use crate::titles::dtos::{ErrorResponse, SeasonResponse};

#[derive(OpenApi)]
#[openapi(
    info(title = "marquee", description = "Title metadata extracted from public title pages"),
    paths(
        crate::titles::handlers::get_title,
        crate::titles::handlers::get_season,
        crate::health::health_check,
    ),
    components(schemas(
        TitleRecord,
        Rating,
        Award,
        Location,
        ReleaseDetailed,
        SpokenLanguage,
        TopCredit,
        EpisodeRecord,
        SeasonRef,
        SeasonResponse,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "titles", description = "Title records and season listings"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
