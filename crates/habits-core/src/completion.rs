//! Completions and the toggle state machine.
//!
//! A completion records that a habit was done on a calendar date. There is at
//! most one completion per `(habit, date)` pair; toggling the same pair again
//! either attaches proof to the existing row or removes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::HabitId;

/// Row identifier assigned by the store on insert.
pub type CompletionId = i64;

// ─── Completion ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
  pub id:              CompletionId,
  pub habit_id:        HabitId,
  /// Calendar date the habit was done on; no time component.
  pub completed_at:    NaiveDate,
  /// Evidence image: a `data:` URI or an external URL.
  pub proof_image_url: Option<String>,
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

/// Input to [`crate::store::HabitStore::toggle_completion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
  pub habit_id:        HabitId,
  /// The caller's local date.
  pub date:            NaiveDate,
  #[serde(default)]
  pub proof_image_url: Option<String>,
}

impl Toggle {
  pub fn new(habit_id: HabitId, date: NaiveDate) -> Self {
    Self { habit_id, date, proof_image_url: None }
  }

  pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
    self.proof_image_url = Some(proof.into());
    self
  }

  /// The supplied proof, treating an empty string as absent.
  pub fn proof(&self) -> Option<&str> {
    self.proof_image_url.as_deref().filter(|p| !p.is_empty())
  }
}

/// Outcome reported to the caller after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStatus {
  /// A new completion row was inserted.
  Completed,
  /// Proof was attached to the existing completion.
  Updated,
  /// The existing completion was removed.
  Uncompleted,
}

impl ToggleStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Completed => "completed",
      Self::Updated => "updated",
      Self::Uncompleted => "uncompleted",
    }
  }
}

impl std::fmt::Display for ToggleStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The single write a toggle performs, decided from the existing row (if any)
/// for the `(habit, date)` pair and whether proof was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
  Insert,
  AttachProof(CompletionId),
  Remove(CompletionId),
}

impl ToggleAction {
  pub fn plan(existing: Option<CompletionId>, has_proof: bool) -> Self {
    match existing {
      None => Self::Insert,
      Some(id) if has_proof => Self::AttachProof(id),
      Some(id) => Self::Remove(id),
    }
  }

  pub fn status(self) -> ToggleStatus {
    match self {
      Self::Insert => ToggleStatus::Completed,
      Self::AttachProof(_) => ToggleStatus::Updated,
      Self::Remove(_) => ToggleStatus::Uncompleted,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plan_covers_all_three_branches() {
    assert_eq!(ToggleAction::plan(None, false), ToggleAction::Insert);
    assert_eq!(ToggleAction::plan(None, true), ToggleAction::Insert);
    assert_eq!(ToggleAction::plan(Some(7), true), ToggleAction::AttachProof(7));
    assert_eq!(ToggleAction::plan(Some(7), false), ToggleAction::Remove(7));
  }

  #[test]
  fn empty_proof_counts_as_absent() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    assert_eq!(Toggle::new(1, date).with_proof("").proof(), None);
    assert_eq!(
      Toggle::new(1, date).with_proof("data:image/png;base64,AA==").proof(),
      Some("data:image/png;base64,AA==")
    );
  }

  #[test]
  fn status_serializes_lowercase() {
    let json = serde_json::to_string(&ToggleStatus::Uncompleted).unwrap();
    assert_eq!(json, "\"uncompleted\"");
    assert_eq!(ToggleAction::AttachProof(1).status().to_string(), "updated");
  }

  #[test]
  fn toggle_body_rejects_malformed_date() {
    let err = serde_json::from_str::<Toggle>(r#"{"habit_id":1,"date":"01/02/2024"}"#);
    assert!(err.is_err());

    let ok: Toggle =
      serde_json::from_str(r#"{"habit_id":1,"date":"2024-01-02"}"#).unwrap();
    assert_eq!(ok.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert!(ok.proof_image_url.is_none());
  }
}
