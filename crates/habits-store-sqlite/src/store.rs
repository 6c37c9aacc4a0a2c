//! [`SqliteStore`]: the SQLite implementation of [`HabitStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use habits_core::{
  completion::{Completion, Toggle, ToggleAction, ToggleStatus},
  day::DaySnapshot,
  habit::{Habit, HabitId, HabitStats, NewHabit},
  store::HabitStore,
};

use crate::{
  Error, Result,
  encode::{
    COMPLETION_COLUMNS, HABIT_COLUMNS, RawCompletion, RawHabit, RawStats,
    encode_date, encode_dt,
  },
  schema::{RESET, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A habit store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. The handle
/// is opened explicitly and should be closed with [`SqliteStore::close`].
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Clones of this store fail afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  /// Drop every table and recreate the schema empty. All habits and
  /// completions are lost.
  pub async fn reset(&self) -> Result<()> {
    tracing::warn!("resetting habit store schema; all stored data is discarded");
    self
      .conn
      .call(|conn| {
        conn.execute_batch(RESET)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn select_habits(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawHabit>> {
  let mut stmt =
    conn.prepare(&format!("SELECT {HABIT_COLUMNS} FROM habits ORDER BY id"))?;
  stmt
    .query_map([], RawHabit::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

fn select_completions_on(
  conn: &rusqlite::Connection,
  date: &str,
) -> rusqlite::Result<Vec<RawCompletion>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {COMPLETION_COLUMNS} FROM completions
     WHERE completed_at = ?1
     ORDER BY id"
  ))?;
  stmt
    .query_map(rusqlite::params![date], RawCompletion::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

// ─── HabitStore impl ─────────────────────────────────────────────────────────

impl HabitStore for SqliteStore {
  type Error = Error;

  // ── Habits ────────────────────────────────────────────────────────────────

  async fn create_habit(&self, input: NewHabit) -> Result<Habit> {
    let created_at = Utc::now();
    let frequency  = input.frequency_or_default().to_owned();

    let name      = input.name.clone();
    let emoji     = input.emoji.clone();
    let color     = input.color.clone();
    let freq      = frequency.clone();
    let at_str    = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO habits (name, emoji, color, frequency, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![name, emoji, color, freq, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Habit {
      id,
      name: input.name,
      emoji: input.emoji,
      color: input.color,
      frequency,
      created_at,
    })
  }

  async fn get_habit(&self, id: HabitId) -> Result<Option<Habit>> {
    let raw: Option<RawHabit> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
            rusqlite::params![id],
            RawHabit::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawHabit::into_habit).transpose()
  }

  async fn list_habits(&self) -> Result<Vec<Habit>> {
    let raws = self
      .conn
      .call(|conn| Ok(select_habits(conn)?))
      .await?;

    raws.into_iter().map(RawHabit::into_habit).collect()
  }

  async fn delete_habit(&self, id: HabitId) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        // Completions go first so the foreign key never dangles.
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM completions WHERE habit_id = ?1",
          rusqlite::params![id],
        )?;
        let n = tx.execute("DELETE FROM habits WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  // ── Completions ───────────────────────────────────────────────────────────

  async fn toggle_completion(&self, toggle: Toggle) -> Result<ToggleStatus> {
    let habit_id = toggle.habit_id;
    let date_str = encode_date(toggle.date);
    let proof    = toggle.proof().map(str::to_owned);

    // Lookup and write share one IMMEDIATE transaction, so two toggles for the
    // same (habit, date) can never both observe "no row".
    let action: Option<ToggleAction> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let habit_exists = tx
          .query_row(
            "SELECT 1 FROM habits WHERE id = ?1",
            rusqlite::params![habit_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !habit_exists {
          return Ok(None);
        }

        let existing: Option<i64> = tx
          .query_row(
            "SELECT id FROM completions WHERE habit_id = ?1 AND completed_at = ?2",
            rusqlite::params![habit_id, date_str],
            |row| row.get(0),
          )
          .optional()?;

        let action = ToggleAction::plan(existing, proof.is_some());
        match action {
          ToggleAction::Insert => tx.execute(
            "INSERT INTO completions (habit_id, completed_at, proof_image_url)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![habit_id, date_str, proof],
          )?,
          ToggleAction::AttachProof(id) => tx.execute(
            "UPDATE completions SET proof_image_url = ?1 WHERE id = ?2",
            rusqlite::params![proof, id],
          )?,
          ToggleAction::Remove(id) => tx.execute(
            "DELETE FROM completions WHERE id = ?1",
            rusqlite::params![id],
          )?,
        };

        tx.commit()?;
        Ok(Some(action))
      })
      .await?;

    let action = action.ok_or(Error::Core(habits_core::Error::HabitNotFound(habit_id)))?;
    Ok(action.status())
  }

  async fn completions_on(&self, date: NaiveDate) -> Result<Vec<Completion>> {
    let date_str = encode_date(date);

    let raws = self
      .conn
      .call(move |conn| Ok(select_completions_on(conn, &date_str)?))
      .await?;

    raws.into_iter().map(RawCompletion::into_completion).collect()
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn day_snapshot(&self, date: NaiveDate) -> Result<DaySnapshot> {
    let date_str = encode_date(date);

    let (raw_habits, raw_completions) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let habits = select_habits(&tx)?;
        let completions = select_completions_on(&tx, &date_str)?;
        tx.commit()?;
        Ok((habits, completions))
      })
      .await?;

    Ok(DaySnapshot {
      date,
      habits:      raw_habits
        .into_iter()
        .map(RawHabit::into_habit)
        .collect::<Result<_>>()?,
      completions: raw_completions
        .into_iter()
        .map(RawCompletion::into_completion)
        .collect::<Result<_>>()?,
    })
  }

  async fn stats(&self) -> Result<Vec<HabitStats>> {
    let raws: Vec<RawStats> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT h.id, h.name, COUNT(c.id) AS completion_count
           FROM habits h
           LEFT JOIN completions c ON c.habit_id = h.id
           GROUP BY h.id
           ORDER BY h.id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawStats {
              habit_id:         row.get(0)?,
              name:             row.get(1)?,
              completion_count: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawStats::into_stats).collect())
  }
}
