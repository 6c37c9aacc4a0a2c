//! The per-day read model: every habit plus the completions dated that day.
//!
//! Never stored, always derived. The caller chooses the day, so a client in a
//! different time zone than the server still sees its own "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{completion::Completion, habit::Habit};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// All habits together with the completions recorded for `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySnapshot {
  pub date:        NaiveDate,
  pub habits:      Vec<Habit>,
  pub completions: Vec<Completion>,
}

impl DaySnapshot {
  /// Join each habit with its completion for the day. If several completions
  /// reference the same habit the first one wins.
  pub fn with_status(&self) -> Vec<HabitWithStatus> {
    self
      .habits
      .iter()
      .map(|habit| {
        let completion = self.completions.iter().find(|c| c.habit_id == habit.id);
        HabitWithStatus {
          habit:           habit.clone(),
          completed_today: completion.is_some(),
          proof_image_url: completion.and_then(|c| c.proof_image_url.clone()),
        }
      })
      .collect()
  }
}

/// A habit annotated with its completion state for the snapshot's day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitWithStatus {
  #[serde(flatten)]
  pub habit:           Habit,
  pub completed_today: bool,
  pub proof_image_url: Option<String>,
}

/// The "today" screen: each habit with its status plus overall progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayView {
  pub date:     NaiveDate,
  pub progress: DayProgress,
  pub habits:   Vec<HabitWithStatus>,
}

impl From<&DaySnapshot> for TodayView {
  fn from(snapshot: &DaySnapshot) -> Self {
    let habits = snapshot.with_status();
    Self {
      date: snapshot.date,
      progress: DayProgress::from_statuses(&habits),
      habits,
    }
  }
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// How far through the day's habits the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
  pub completed: usize,
  pub total:     usize,
  /// Rounded to the nearest whole percent; 0 when there are no habits.
  pub percent:   u8,
}

impl DayProgress {
  pub fn from_statuses(statuses: &[HabitWithStatus]) -> Self {
    let total = statuses.len();
    let completed = statuses.iter().filter(|s| s.completed_today).count();
    let percent = if total == 0 {
      0
    } else {
      ((completed as f64 / total as f64) * 100.0).round() as u8
    };
    Self { completed, total, percent }
  }
}
