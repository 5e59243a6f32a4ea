//! HTTP Error Mapping
//!
//! Every failure becomes a JSON `{"error": "..."}` body with a status code.

use crate::types::ErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use todo_core::domain::DomainError;
use todo_core::error::AppError;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Error raised by the core
    App(AppError),
    /// Body could not be decoded
    BadRequest(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::App(AppError::Domain(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::App(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            // Domain messages are already user facing ("Invalid text")
            ApiError::App(AppError::Domain(err)) => err.to_string(),
            ApiError::App(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_bad_requests() {
        let err: ApiError = DomainError::InvalidIntent.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid intent");
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let err: ApiError = AppError::Storage("locked".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("locked"));
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = ApiError::BadRequest("bad form".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
