//! Handler for `GET /stats`.

use std::sync::Arc;

use axum::{Json, extract::State};
use habits_core::{habit::HabitStats, store::HabitStore};

use crate::error::ApiError;

/// `GET /stats`: all-time completion count per habit.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<HabitStats>>, ApiError>
where
  S: HabitStore,
{
  let stats = store.stats().await.map_err(ApiError::store)?;
  Ok(Json(stats))
}
