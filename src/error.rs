use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with. Each variant maps to one HTTP status
/// and a `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("incorrect email or password")]
    BadCredentials,
    #[error("could not validate credentials")]
    InvalidToken,
    #[error("not enough permissions")]
    PermissionDenied,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("password hashing failed")]
    PasswordHash,
    #[error("token signing failed")]
    TokenCreation,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::BadCredentials => (StatusCode::BAD_REQUEST, "Incorrect email or password"),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Could not validate credentials"),
            ApiError::PermissionDenied => (StatusCode::FORBIDDEN, "Not enough permissions"),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, *detail),
            ApiError::Conflict(detail) => (StatusCode::CONFLICT, *detail),
            ApiError::PasswordHash | ApiError::TokenCreation | ApiError::Database(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if matches!(self, ApiError::InvalidToken) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
