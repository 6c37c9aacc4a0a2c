//! SQL schema for the habit SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    emoji       TEXT,
    color       TEXT,              -- hex string, e.g. '#007AFF'
    frequency   TEXT NOT NULL DEFAULT 'daily',
    created_at  TEXT NOT NULL      -- RFC 3339 UTC; server-assigned
);

-- At most one completion per (habit, day).
CREATE TABLE IF NOT EXISTS completions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    habit_id         INTEGER NOT NULL REFERENCES habits(id),
    completed_at     TEXT NOT NULL,   -- YYYY-MM-DD
    proof_image_url  TEXT,            -- data: URI or external URL
    UNIQUE (habit_id, completed_at)
);

CREATE INDEX IF NOT EXISTS completions_date_idx ON completions(completed_at);

PRAGMA user_version = 1;
";

/// Drops every table so [`SCHEMA`] can recreate them empty.
pub const RESET: &str = "
DROP TABLE IF EXISTS completions;
DROP TABLE IF EXISTS habits;
";
