//! Handler for `POST /complete`, the completion toggle.

use std::sync::Arc;

use axum::extract::State;
use habits_core::{
  completion::{Toggle, ToggleStatus},
  store::HabitStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extract::Json};

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
  pub status: ToggleStatus,
}

/// `POST /complete` with body `{"habit_id":1,"date":"2024-01-01","proof_image_url":"data:..."}`.
///
/// Returns `{"status":"completed"|"updated"|"uncompleted"}`, or 404 when the
/// habit does not exist.
pub async fn toggle<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Toggle>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: HabitStore,
{
  let habit_id = body.habit_id;
  let date = body.date;
  let status = store.toggle_completion(body).await.map_err(ApiError::store)?;
  tracing::debug!(habit_id, %date, %status, "completion toggled");
  Ok(Json(ToggleResponse { status }))
}
