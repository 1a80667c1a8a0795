use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor that reports decode failures as a 400 `{error}`.
///
/// Unlike `axum::Json` it does not look at the `Content-Type` header and does not
/// answer shape mismatches with 422. Oversized bodies keep their 413 status.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(rejection.body_text())
            } else {
                ApiError::InvalidBody(rejection.body_text())
            }
        })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// The `:id` path segment as opaque text.
///
/// Segments that do not percent-decode to UTF-8 are decoded lossily instead of
/// being rejected, so they reach the store like any other unknown id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(PathId(id)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => {
                let raw = parts.uri.path().rsplit('/').next().unwrap_or("");
                Ok(PathId(percent_decode_str(raw).decode_utf8_lossy().into_owned()))
            }
            Err(rejection) => Err(ApiError::Internal(rejection.body_text())),
        }
    }
}
