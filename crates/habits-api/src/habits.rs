//! Handlers for `/habits` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/habits` | Optional `?date=YYYY-MM-DD`; all habits + that day's completions |
//! | `POST`   | `/habits` | Body: [`NewHabit`]; returns 201 + `{"id":..}` |
//! | `GET`    | `/habits/today` | Optional `?date`; habits joined with their status |
//! | `GET`    | `/habits/:id` | 404 if not found |
//! | `DELETE` | `/habits/:id` | Removes the habit and its completions |

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use habits_core::{
  day::{DaySnapshot, TodayView},
  habit::{Habit, HabitId, NewHabit},
  store::HabitStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Day selection ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct DayParams {
  /// The day to report on. Defaults to the server's current UTC date.
  pub date: Option<NaiveDate>,
}

impl DayParams {
  pub fn resolve(&self) -> NaiveDate {
    self.date.unwrap_or_else(|| Utc::now().date_naive())
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /habits[?date=YYYY-MM-DD]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<DayParams>,
) -> Result<Json<DaySnapshot>, ApiError>
where
  S: HabitStore,
{
  let snapshot = store
    .day_snapshot(params.resolve())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(snapshot))
}

/// `GET /habits/today[?date=YYYY-MM-DD]`
pub async fn today<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<DayParams>,
) -> Result<Json<TodayView>, ApiError>
where
  S: HabitStore,
{
  let snapshot = store
    .day_snapshot(params.resolve())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(TodayView::from(&snapshot)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
  pub id: HabitId,
}

/// `POST /habits` with body `{"name":"Read","emoji":"📖","color":"#007AFF"}`.
/// `icon` is accepted as an alias of `emoji`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewHabit>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HabitStore,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("habit name must not be empty".into()));
  }

  let habit = store.create_habit(body).await.map_err(ApiError::store)?;
  tracing::debug!(id = habit.id, name = %habit.name, "habit created");
  Ok((StatusCode::CREATED, Json(Created { id: habit.id })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /habits/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<HabitId>,
) -> Result<Json<Habit>, ApiError>
where
  S: HabitStore,
{
  let habit = store
    .get_habit(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("habit {id} not found")))?;
  Ok(Json(habit))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /habits/{id}` returns `{"success":true}`.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<HabitId>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: HabitStore,
{
  let existed = store.delete_habit(id).await.map_err(ApiError::store)?;
  if !existed {
    return Err(ApiError::NotFound(format!("habit {id} not found")));
  }
  tracing::debug!(id, "habit deleted");
  Ok(Json(json!({ "success": true })))
}
