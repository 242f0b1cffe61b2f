//! API error type and [`axum::response::IntoResponse`] implementation.

use astra_core::replay::ReplayError;
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("generation failed")]
  Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ReplayError> for ApiError {
  fn from(err: ReplayError) -> Self {
    match err {
      ReplayError::SubjectArity { .. } => ApiError::BadRequest(err.to_string()),
      ReplayError::Oracle(e) => ApiError::Generation(e),
      ReplayError::Store(e) => ApiError::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      // Upstream details stay out of the response body.
      ApiError::Generation(_) => {
        (StatusCode::BAD_GATEWAY, "generation failed".to_owned())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
