use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Errors a handler can end a request with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body did not decode into the expected shape.
    #[error("{0}")]
    InvalidBody(String),

    /// Request body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Failure outside the store, such as a panicking handler.
    #[error("{0}")]
    Internal(String),

    /// Any store failure, including a lookup that matched no row.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Rejected request");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
