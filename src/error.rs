use axum::{
    Json,
    http::{StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};

use crate::database::StoreError;

#[derive(Debug)]
pub enum URLError {
    Unauthorized,
    MalformedRequest,
    IncorrectPath,
    Expired,
    Persist(StoreError),
    Lookup(StoreError),
    InvalidTarget(InvalidHeaderValue),
}

impl URLError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid or missing token"),
            Self::MalformedRequest => (StatusCode::BAD_REQUEST, "Invalid request"),
            Self::IncorrectPath => (StatusCode::NOT_FOUND, "URL not found"),
            Self::Expired => (StatusCode::GONE, "URL has expired"),
            Self::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save URL"),
            Self::Lookup(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to look up URL"),
            Self::InvalidTarget(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Stored URL is not a valid redirect target",
            ),
        }
    }
}

impl IntoResponse for URLError {
    fn into_response(self) -> Response {
        match &self {
            Self::Persist(err) | Self::Lookup(err) => tracing::error!(err = ?err),
            Self::InvalidTarget(err) => tracing::error!(err = ?err, "cannot redirect"),
            _ => {}
        }

        let (status, message) = self.status_and_message();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
