use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every handler:
/// `{"status": 404, "error": "Not Found", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    #[serde(rename = "status")]
    pub code: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, code: status.as_u16(), error: error.to_string(), message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::NotAssociated | ServiceError::PreconditionFailed(_) => {
                JsonApiError::new(StatusCode::PRECONDITION_FAILED, "Precondition Failed", Some(e.to_string()))
            }
            ServiceError::Validation(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            ServiceError::Db(_) => {
                error!(code = e.code(), err = %e, "request failed on the database");
                JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("an unexpected error occurred".to_string()),
                )
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(err = %rejection.body_text(), "rejected request body");
        JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(rejection.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::errors::EntityKind;

    #[test]
    fn business_errors_map_to_client_statuses() {
        let cases = [
            (ServiceError::NotFound(EntityKind::Airline), StatusCode::NOT_FOUND),
            (ServiceError::NotFound(EntityKind::Airport), StatusCode::NOT_FOUND),
            (ServiceError::NotAssociated, StatusCode::PRECONDITION_FAILED),
            (ServiceError::PreconditionFailed("founding date".into()), StatusCode::PRECONDITION_FAILED),
            (ServiceError::Validation("name".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            let mapped = JsonApiError::from(err);
            assert_eq!(mapped.status, status);
            assert_eq!(mapped.code, status.as_u16());
        }
    }

    #[test]
    fn db_errors_hide_details() {
        let mapped = JsonApiError::from(ServiceError::Db("password authentication failed for user".into()));
        assert_eq!(mapped.status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = mapped.message.unwrap_or_default();
        assert!(!message.contains("password"));
    }

    #[test]
    fn body_carries_status_error_and_message() {
        let body = serde_json::to_value(JsonApiError::from(ServiceError::NotAssociated)).unwrap();
        assert_eq!(body["status"], 412);
        assert_eq!(body["error"], "Precondition Failed");
        assert_eq!(body["message"], "the airport with the given id is not associated to the airline");
    }
}
