//! The `HabitStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `habits-store-sqlite`).
//! Higher layers (`habits-api`, `habits-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  completion::{Completion, Toggle, ToggleStatus},
  day::DaySnapshot,
  habit::{Habit, HabitId, HabitStats, NewHabit},
};

/// Abstraction over a habit store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait HabitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Habits ────────────────────────────────────────────────────────────

  /// Create and persist a new habit. `id` and `created_at` are set by the
  /// store; two identical inputs yield two distinct habits.
  fn create_habit(
    &self,
    input: NewHabit,
  ) -> impl Future<Output = Result<Habit, Self::Error>> + Send + '_;

  /// Retrieve a habit by id. Returns `None` if not found.
  fn get_habit(
    &self,
    id: HabitId,
  ) -> impl Future<Output = Result<Option<Habit>, Self::Error>> + Send + '_;

  /// List every habit in creation order. Unfiltered and unpaginated.
  fn list_habits(
    &self,
  ) -> impl Future<Output = Result<Vec<Habit>, Self::Error>> + Send + '_;

  /// Delete a habit together with all of its completions.
  ///
  /// Returns `false` if no habit with that id existed.
  fn delete_habit(
    &self,
    id: HabitId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Completions ───────────────────────────────────────────────────────

  /// Reconcile one `(habit, date, proof?)` intent against the stored
  /// completion for that pair:
  ///
  /// - no completion yet: insert one → [`ToggleStatus::Completed`]
  /// - completion exists and proof supplied: replace its proof →
  ///   [`ToggleStatus::Updated`]
  /// - completion exists and no proof: delete it →
  ///   [`ToggleStatus::Uncompleted`]
  ///
  /// Exactly one write happens, atomically with the lookup.
  fn toggle_completion(
    &self,
    toggle: Toggle,
  ) -> impl Future<Output = Result<ToggleStatus, Self::Error>> + Send + '_;

  /// All completions dated `date`.
  fn completions_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Completion>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every habit plus the completions dated `date`, read together.
  fn day_snapshot(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<DaySnapshot, Self::Error>> + Send + '_;

  /// All-time completion counts, one entry per habit.
  fn stats(
    &self,
  ) -> impl Future<Output = Result<Vec<HabitStats>, Self::Error>> + Send + '_;
}
