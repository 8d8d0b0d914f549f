use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::domain::{Airport, AirportInput};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/airports", tag = "airports",
    responses(
        (status = 200, description = "All airports with their airlines", body = [crate::openapi::AirportDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Airport>>, JsonApiError> {
    Ok(Json(state.airports.find_all().await?))
}

#[utoipa::path(
    post, path = "/airports", tag = "airports",
    request_body = crate::openapi::AirportInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AirportDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 412, description = "Airport code is not three characters", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<AirportInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Airport>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.airports.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/airports/{airport_id}", tag = "airports",
    params(("airport_id" = Uuid, Path, description = "Airport ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AirportDoc),
        (status = 404, description = "Airport not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Airport>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.airports.find_one(id).await?))
}

#[utoipa::path(
    put, path = "/airports/{airport_id}", tag = "airports",
    params(("airport_id" = Uuid, Path, description = "Airport ID")),
    request_body = crate::openapi::AirportInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AirportDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Airport not found", body = crate::openapi::ErrorBody),
        (status = 412, description = "Airport code is not three characters", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AirportInput>, JsonRejection>,
) -> Result<Json<Airport>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.airports.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/airports/{airport_id}", tag = "airports",
    params(("airport_id" = Uuid, Path, description = "Airport ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Airport not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.airports.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
