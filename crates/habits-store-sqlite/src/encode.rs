//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use habits_core::{
  completion::Completion,
  habit::{Habit, HabitStats},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

pub const HABIT_COLUMNS: &str = "id, name, emoji, color, frequency, created_at";

/// Intermediate struct for reading a `habits` row.
pub struct RawHabit {
  pub id:         i64,
  pub name:       String,
  pub emoji:      Option<String>,
  pub color:      Option<String>,
  pub frequency:  String,
  pub created_at: String,
}

impl RawHabit {
  /// Map a row selected with [`HABIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      emoji:      row.get(2)?,
      color:      row.get(3)?,
      frequency:  row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_habit(self) -> Result<Habit> {
    Ok(Habit {
      id:         self.id,
      name:       self.name,
      emoji:      self.emoji,
      color:      self.color,
      frequency:  self.frequency,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub const COMPLETION_COLUMNS: &str = "id, habit_id, completed_at, proof_image_url";

/// Intermediate struct for reading a `completions` row.
pub struct RawCompletion {
  pub id:              i64,
  pub habit_id:        i64,
  pub completed_at:    String,
  pub proof_image_url: Option<String>,
}

impl RawCompletion {
  /// Map a row selected with [`COMPLETION_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      habit_id:        row.get(1)?,
      completed_at:    row.get(2)?,
      proof_image_url: row.get(3)?,
    })
  }

  pub fn into_completion(self) -> Result<Completion> {
    Ok(Completion {
      id:              self.id,
      habit_id:        self.habit_id,
      completed_at:    decode_date(&self.completed_at)?,
      proof_image_url: self.proof_image_url,
    })
  }
}

/// Intermediate struct for one row of the stats aggregate.
pub struct RawStats {
  pub habit_id:         i64,
  pub name:             String,
  pub completion_count: i64,
}

impl RawStats {
  pub fn into_stats(self) -> HabitStats {
    HabitStats {
      habit_id:         self.habit_id,
      name:             self.name,
      completion_count: self.completion_count.max(0) as u64,
    }
  }
}
