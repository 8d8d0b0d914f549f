use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::domain::{Airline, AirlineInput};
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/airlines", tag = "airlines",
    responses(
        (status = 200, description = "All airlines with their airports", body = [crate::openapi::AirlineDoc]),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Airline>>, JsonApiError> {
    Ok(Json(state.airlines.find_all().await?))
}

#[utoipa::path(
    post, path = "/airlines", tag = "airlines",
    request_body = crate::openapi::AirlineInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AirlineDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 412, description = "Founding date in the future", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<AirlineInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Airline>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.airlines.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/airlines/{airline_id}", tag = "airlines",
    params(("airline_id" = Uuid, Path, description = "Airline ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AirlineDoc),
        (status = 404, description = "Airline not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Airline>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.airlines.find_one(id).await?))
}

#[utoipa::path(
    put, path = "/airlines/{airline_id}", tag = "airlines",
    params(("airline_id" = Uuid, Path, description = "Airline ID")),
    request_body = crate::openapi::AirlineInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AirlineDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 404, description = "Airline not found", body = crate::openapi::ErrorBody),
        (status = 412, description = "Founding date in the future", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AirlineInput>, JsonRejection>,
) -> Result<Json<Airline>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.airlines.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/airlines/{airline_id}", tag = "airlines",
    params(("airline_id" = Uuid, Path, description = "Airline ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Airline not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.airlines.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
