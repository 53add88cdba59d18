//! SQL schema for the Stride SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per extent. A save rewrites every row in one transaction.
CREATE TABLE IF NOT EXISTS extents (
    kind     TEXT PRIMARY KEY,   -- 'customer' | 'order' | ...
    body     TEXT NOT NULL,      -- JSON array of the extent's members
    saved_at TEXT NOT NULL       -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
