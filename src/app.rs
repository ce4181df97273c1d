use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{app_state::AppState, health, openapi, titles};

/// Full HTTP application: title routes, health, OpenAPI document, request
/// tracing with an `x-request-id` on every request and response.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(titles::routes())
        .route("/healthz", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
