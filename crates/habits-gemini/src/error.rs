//! Error type for `habits-gemini`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("gemini returned http {status}: {body}")]
  Http { status: u16, body: String },

  /// The response arrived but its content failed validation.
  #[error("invalid response: {0}")]
  Invalid(#[from] habits_core::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
