//! SQL schema for the Note-It SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS notes (
    note_id     INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    content     TEXT,
    note_type   TEXT NOT NULL DEFAULT 'MISC'
                CHECK (note_type IN ('MISC', 'EVENT', 'WORK', 'REMINDER', 'STUDY', 'MEETING')),
    created_at  TEXT NOT NULL,    -- RFC 3339 UTC; set once at insert
    modified_at TEXT NOT NULL     -- refreshed by the store on every update
);

-- Images belong to exactly one note and die with it.
CREATE TABLE IF NOT EXISTS images (
    image_id INTEGER PRIMARY KEY,
    note_id  INTEGER NOT NULL REFERENCES notes(note_id) ON DELETE CASCADE,
    payload  TEXT NOT NULL        -- base64-encoded photo bytes
);

CREATE INDEX IF NOT EXISTS notes_created_idx ON notes(created_at);
CREATE INDEX IF NOT EXISTS images_note_idx   ON images(note_id);

PRAGMA user_version = 1;
";
