//! SQL schema for the labtrack SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    phone         TEXT,
    department    TEXT,
    registered_at TEXT NOT NULL    -- 'YYYY-MM-DD HH:MM:SS'; server-assigned
);

-- One row per lab visit. exit_time IS NULL marks an open session; at most
-- one open row may exist per person at any time.
CREATE TABLE IF NOT EXISTS lab_records (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    lab_name   TEXT NOT NULL,
    entry_time TEXT NOT NULL,
    exit_time  TEXT              -- NULL while the person is inside
);

CREATE INDEX IF NOT EXISTS lab_records_person_idx ON lab_records(person_id);
CREATE INDEX IF NOT EXISTS lab_records_entry_idx  ON lab_records(entry_time);

PRAGMA user_version = 1;
";
