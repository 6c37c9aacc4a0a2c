//! Error types for `habits-core`.

use thiserror::Error;

use crate::habit::HabitId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("habit not found: {0}")]
  HabitNotFound(HabitId),

  #[error("invalid habit suggestion: {0}")]
  InvalidSuggestion(String),

  #[error("invalid data URI: {0}")]
  InvalidDataUri(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
