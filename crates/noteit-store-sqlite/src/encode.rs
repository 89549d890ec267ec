//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; note types as their
//! upper-case discriminants. Both timestamps on a row are written by the
//! store, so their textual forms are directly comparable (the "edited at
//! least once" aggregate relies on this).

use chrono::{DateTime, Utc};
use noteit_core::note::{Note, NoteType};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `notes` row.
pub struct RawNote {
  pub note_id:     i64,
  pub title:       String,
  pub content:     Option<String>,
  pub note_type:   String,
  pub created_at:  String,
  pub modified_at: String,
}

impl RawNote {
  /// Read the six `notes` columns, in `SELECT` order.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      note_id:     row.get(0)?,
      title:       row.get(1)?,
      content:     row.get(2)?,
      note_type:   row.get(3)?,
      created_at:  row.get(4)?,
      modified_at: row.get(5)?,
    })
  }

  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      note_id:     self.note_id,
      title:       self.title,
      content:     self.content,
      note_type:   NoteType::from_discriminant(&self.note_type)?,
      created_at:  decode_dt(&self.created_at)?,
      modified_at: decode_dt(&self.modified_at)?,
    })
  }
}
