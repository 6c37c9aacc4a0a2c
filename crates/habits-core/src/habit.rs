//! Habits, the user-defined activities being tracked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row identifier assigned by the store on insert.
pub type HabitId = i64;

/// The frequency recorded when the caller does not supply one. Nothing in the
/// tracker interprets it; it is carried for display.
pub const DEFAULT_FREQUENCY: &str = "daily";

// ─── Habit ───────────────────────────────────────────────────────────────────

/// A persisted habit. The id and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
  pub id:         HabitId,
  pub name:       String,
  /// Display glyph, e.g. "📖" or an icon name.
  pub emoji:      Option<String>,
  /// Display color as a hex string, e.g. "#007AFF".
  pub color:      Option<String>,
  pub frequency:  String,
  /// Server-assigned timestamp.
  pub created_at: DateTime<Utc>,
}

// ─── NewHabit ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::HabitStore::create_habit`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
  pub name:      String,
  #[serde(default, alias = "icon")]
  pub emoji:     Option<String>,
  #[serde(default)]
  pub color:     Option<String>,
  #[serde(default)]
  pub frequency: Option<String>,
}

impl NewHabit {
  /// Convenience constructor with all optional fields unset.
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
    self.emoji = Some(emoji.into());
    self
  }

  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.color = Some(color.into());
    self
  }

  /// The frequency to persist, falling back to [`DEFAULT_FREQUENCY`].
  pub fn frequency_or_default(&self) -> &str {
    self
      .frequency
      .as_deref()
      .filter(|f| !f.trim().is_empty())
      .unwrap_or(DEFAULT_FREQUENCY)
  }
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// All-time completion count for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStats {
  pub habit_id:         HabitId,
  pub name:             String,
  pub completion_count: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn frequency_defaults_to_daily() {
    assert_eq!(NewHabit::new("Read").frequency_or_default(), "daily");

    let mut blank = NewHabit::new("Read");
    blank.frequency = Some("  ".into());
    assert_eq!(blank.frequency_or_default(), "daily");

    let mut weekly = NewHabit::new("Read");
    weekly.frequency = Some("weekly".into());
    assert_eq!(weekly.frequency_or_default(), "weekly");
  }

  #[test]
  fn icon_is_accepted_as_emoji() {
    let body: NewHabit = serde_json::from_str(
      r##"{"name":"Stretch","icon":"Activity","color":"#34C759"}"##,
    )
    .unwrap();
    assert_eq!(body.emoji.as_deref(), Some("Activity"));
    assert_eq!(body.color.as_deref(), Some("#34C759"));
    assert!(body.frequency.is_none());
  }
}
