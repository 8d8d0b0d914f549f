//! Airports linked to an airline, nested under `/airlines/{airline_id}/airports`.

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::domain::{Airline, Airport, AirportRef};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/airlines/{airline_id}/airports/{airport_id}", tag = "associations",
    params(
        ("airline_id" = Uuid, Path, description = "Airline ID"),
        ("airport_id" = Uuid, Path, description = "Airport ID")
    ),
    responses(
        (status = 200, description = "Airline with its updated airports", body = crate::openapi::AirlineDoc),
        (status = 404, description = "Airline or airport not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<Json<Airline>, JsonApiError> {
    let Path((airline_id, airport_id)) = ids?;
    Ok(Json(state.associations.add_link(airline_id, airport_id).await?))
}

#[utoipa::path(
    get, path = "/airlines/{airline_id}/airports", tag = "associations",
    params(("airline_id" = Uuid, Path, description = "Airline ID")),
    responses(
        (status = 200, description = "Airports linked to the airline", body = [crate::openapi::AirportDoc]),
        (status = 404, description = "Airline not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Airport>>, JsonApiError> {
    let Path(airline_id) = id?;
    Ok(Json(state.associations.list_linked_airports(airline_id).await?))
}

#[utoipa::path(
    get, path = "/airlines/{airline_id}/airports/{airport_id}", tag = "associations",
    params(
        ("airline_id" = Uuid, Path, description = "Airline ID"),
        ("airport_id" = Uuid, Path, description = "Airport ID")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AirportDoc),
        (status = 404, description = "Airline or airport not found", body = crate::openapi::ErrorBody),
        (status = 412, description = "Airport not associated to the airline", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<Json<Airport>, JsonApiError> {
    let Path((airline_id, airport_id)) = ids?;
    Ok(Json(state.associations.get_linked_airport(airline_id, airport_id).await?))
}

/// Replace the airline's airports. Each element only needs an `id`; full
/// airport payloads are accepted and their other fields ignored.
#[utoipa::path(
    put, path = "/airlines/{airline_id}/airports", tag = "associations",
    params(("airline_id" = Uuid, Path, description = "Airline ID")),
    request_body = [crate::openapi::AirportRefDoc],
    responses(
        (status = 200, description = "Airline with its new airports", body = crate::openapi::AirlineDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Airline or one of the airports not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<Vec<AirportRef>>, JsonRejection>,
) -> Result<Json<Airline>, JsonApiError> {
    let Path(airline_id) = id?;
    let Json(airports) = payload?;
    Ok(Json(state.associations.replace_linked_airports(airline_id, &airports).await?))
}

#[utoipa::path(
    delete, path = "/airlines/{airline_id}/airports/{airport_id}", tag = "associations",
    params(
        ("airline_id" = Uuid, Path, description = "Airline ID"),
        ("airport_id" = Uuid, Path, description = "Airport ID")
    ),
    responses(
        (status = 204, description = "Unlinked"),
        (status = 404, description = "Airline or airport not found", body = crate::openapi::ErrorBody),
        (status = 412, description = "Airport not associated to the airline", body = crate::openapi::ErrorBody)
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path((airline_id, airport_id)) = ids?;
    state.associations.remove_link(airline_id, airport_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
