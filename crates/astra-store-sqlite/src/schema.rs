//! SQL schema for the Astra SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS profiles (
    uid           TEXT PRIMARY KEY,
    name          TEXT NOT NULL DEFAULT '',
    birth_date    TEXT,                                 -- YYYY-MM-DD or NULL
    gender        TEXT NOT NULL DEFAULT 'unspecified',
    star_energy   INTEGER NOT NULL,
    share_count   INTEGER NOT NULL DEFAULT 0,
    badges        TEXT NOT NULL DEFAULT '[]',           -- JSON array of strings
    last_check_in TEXT,                                 -- YYYY-MM-DD or NULL
    last_sync     TEXT NOT NULL                         -- ISO 8601 UTC; store-assigned
);

-- History is append-only from the caller's perspective. The store evicts
-- the oldest rows beyond the retention cap after each insert; no UPDATE is
-- ever issued against this table.
CREATE TABLE IF NOT EXISTS history (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,      -- insertion sequence; breaks timestamp ties
    entry_id    TEXT NOT NULL UNIQUE,
    kind        TEXT NOT NULL,                          -- 'fortune' | 'match' | 'mystery_box'
    subjects    TEXT NOT NULL,
    digest      TEXT NOT NULL,
    seed        INTEGER NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS history_kind_idx     ON history(kind);
CREATE INDEX IF NOT EXISTS history_recorded_idx ON history(recorded_at);

PRAGMA user_version = 1;
";
