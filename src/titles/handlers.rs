use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, instrument};

use crate::{
    app_state::AppState,
    extractor::{ExtractError, TitleRecord},
    titles::dtos::{ErrorResponse, SeasonResponse},
};

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn extraction_failed(err: ExtractError) -> Response {
    error!("Request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/title/{id}",
    tag = "titles",
    params(("id" = String, Path, description = "Title id, e.g. tt1375666")),
    responses(
        (status = 200, description = "Normalized title record", body = TitleRecord),
        (status = 400, description = "Empty title id", body = ErrorResponse),
        (status = 500, description = "Fetch or extraction failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_title(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = id.trim();
    if id.is_empty() {
        return bad_request("Title id cannot be empty");
    }

    match state.titles.title(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => extraction_failed(err),
    }
}

#[utoipa::path(
    get,
    path = "/title/{id}/season/{season_id}",
    tag = "titles",
    params(
        ("id" = String, Path, description = "Series id, e.g. tt0903747"),
        ("season_id" = String, Path, description = "Season identifier as listed in all_seasons")
    ),
    responses(
        (status = 200, description = "Episodes of the season and all seasons of the series", body = SeasonResponse),
        (status = 400, description = "Empty title or season id", body = ErrorResponse),
        (status = 500, description = "Fetch failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_season(
    State(state): State<AppState>,
    Path((id, season_id)): Path<(String, String)>,
) -> Response {
    let (id, season_id) = (id.trim(), season_id.trim());
    if id.is_empty() || season_id.is_empty() {
        return bad_request("Title id and season id cannot be empty");
    }

    match state.titles.season(id, season_id).await {
        Ok(fragment) => (
            StatusCode::OK,
            Json(SeasonResponse::new(id, season_id, fragment)),
        )
            .into_response(),
        Err(err) => extraction_failed(err),
    }
}
