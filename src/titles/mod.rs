pub mod dtos;
pub mod handlers;

use axum::{Router, routing::get};

use crate::app_state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/title/{id}", get(handlers::get_title))
        .route("/title/{id}/season/{season_id}", get(handlers::get_season))
}
