use std::time::Duration;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod airlines;
pub mod airports;
pub mod associations;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, docs, airline and airport
/// resources and the association routes nested under airlines.
pub fn build_router(state: ServerState, cors: CorsLayer, request_timeout: Duration) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));

    let airline_routes = Router::new()
        .route("/airlines", get(airlines::list).post(airlines::create))
        .route(
            "/airlines/:airline_id",
            get(airlines::get).put(airlines::update).delete(airlines::delete),
        );

    let airport_routes = Router::new()
        .route("/airports", get(airports::list).post(airports::create))
        .route(
            "/airports/:airport_id",
            get(airports::get).put(airports::update).delete(airports::delete),
        );

    let association_routes = Router::new()
        .route(
            "/airlines/:airline_id/airports",
            get(associations::list).put(associations::replace),
        )
        .route(
            "/airlines/:airline_id/airports/:airport_id",
            get(associations::get).post(associations::add).delete(associations::remove),
        );

    public
        .merge(airline_routes)
        .merge(airport_routes)
        .merge(association_routes)
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
