//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use dossier_core::{ErrorKind, store::StoreError};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body failed field validation; nothing was written.
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// Well-formed input that breaks a cross-field rule.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend failure: domain errors keep their meaning, anything
  /// else is an opaque [`ApiError::Store`].
  pub fn from_store<E: StoreError>(err: E) -> Self {
    let Some(domain) = err.domain() else {
      return ApiError::Store(Box::new(err));
    };
    let message = domain.to_string();
    match domain.kind() {
      ErrorKind::NotFound => ApiError::NotFound(message),
      ErrorKind::Conflict => ApiError::Conflict(message),
      ErrorKind::InvariantViolation => ApiError::Unprocessable(message),
      ErrorKind::Invalid => ApiError::BadRequest(message),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": "validation failed", "details": errors }),
      ),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m }))
      }
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": e.to_string() }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
