//! Handlers for `/ai` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/ai/suggestions` | Body: `{"goals":"..."}`; returns validated suggestions |
//! | `POST` | `/ai/motivation` | Body: `{"habit_name":"..."}`; returns `{"quote":..}` |
//! | `POST` | `/ai/proof-edits` | Body: `{"image":"data:...","prompt":"..."}`; returns `{"image":..}` |
//!
//! Upstream failures are logged and surface as 502; nothing is retried.

use std::sync::Arc;

use axum::extract::State;
use habits_core::{
  assistant::Assistant, data_uri::DataUri, suggestion::HabitSuggestion,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::Json};

fn require(field: &str, value: &str) -> Result<(), ApiError> {
  if value.trim().is_empty() {
    return Err(ApiError::BadRequest(format!("{field} must not be empty")));
  }
  Ok(())
}

// ─── Suggestions ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestBody {
  pub goals: String,
}

/// `POST /ai/suggestions`
pub async fn suggest<A>(
  State(assistant): State<Arc<A>>,
  Json(body): Json<SuggestBody>,
) -> Result<Json<Vec<HabitSuggestion>>, ApiError>
where
  A: Assistant,
{
  require("goals", &body.goals)?;
  let suggestions = assistant
    .suggest_habits(&body.goals)
    .await
    .map_err(ApiError::upstream)?;
  Ok(Json(suggestions))
}

// ─── Motivation ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct MotivationBody {
  pub habit_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MotivationResponse {
  pub quote: Option<String>,
}

/// `POST /ai/motivation`
pub async fn motivation<A>(
  State(assistant): State<Arc<A>>,
  Json(body): Json<MotivationBody>,
) -> Result<Json<MotivationResponse>, ApiError>
where
  A: Assistant,
{
  require("habit_name", &body.habit_name)?;
  let quote = assistant
    .motivation(&body.habit_name)
    .await
    .map_err(ApiError::upstream)?;
  Ok(Json(MotivationResponse { quote }))
}

// ─── Proof edits ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ProofEditBody {
  /// The source image as a `data:` URI.
  pub image:  String,
  pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProofEditResponse {
  /// The edited image as a `data:` URI, or `null` if none was produced.
  pub image: Option<String>,
}

/// `POST /ai/proof-edits`
pub async fn edit_proof<A>(
  State(assistant): State<Arc<A>>,
  Json(body): Json<ProofEditBody>,
) -> Result<Json<ProofEditResponse>, ApiError>
where
  A: Assistant,
{
  require("prompt", &body.prompt)?;
  let image: DataUri = body
    .image
    .parse()
    .map_err(|e: habits_core::Error| ApiError::BadRequest(e.to_string()))?;

  let edited = assistant
    .edit_proof_image(&image, &body.prompt)
    .await
    .map_err(ApiError::upstream)?;
  Ok(Json(ProofEditResponse { image: edited.map(|uri| uri.to_string()) }))
}

/// Fallback for `/ai/*` when the server runs without an assistant.
pub async fn unavailable() -> ApiError { ApiError::AssistantUnavailable }
