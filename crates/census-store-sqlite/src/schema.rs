//! SQL schema for the Census SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS person (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    surname     TEXT    NOT NULL,
    birthday    TEXT    NOT NULL,   -- YYYY-MM-DD
    sex         INTEGER NOT NULL CHECK (sex IN (0, 1)),   -- 0 woman, 1 man
    birth_city  TEXT    NOT NULL
);

PRAGMA user_version = 1;
";
