//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
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

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The AI assistant failed or returned something unusable.
  #[error("assistant error: {0}")]
  Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("no assistant is configured")]
  AssistantUnavailable,
}

impl ApiError {
  /// Wrap a store failure. Domain errors anywhere in the source chain are
  /// classified, so a habit deleted mid-request still answers 404.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(&e);
    while let Some(err) = cause {
      if let Some(habits_core::Error::HabitNotFound(id)) =
        err.downcast_ref::<habits_core::Error>()
      {
        return Self::NotFound(format!("habit {id} not found"));
      }
      cause = err.source();
    }
    Self::Store(Box::new(e))
  }

  pub fn upstream(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    tracing::warn!(error = %e, "assistant request failed");
    Self::Upstream(Box::new(e))
  }
}

// ─── Extractor rejections ────────────────────────────────────────────────────

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      ApiError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
      ApiError::AssistantUnavailable => {
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
