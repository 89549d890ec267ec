//! Note — the user-authored record at the centre of the store.
//!
//! A note owns its timestamps but never assigns them: `created_at` and
//! `modified_at` are set by the store, so callers cannot violate the
//! `modified_at >= created_at` invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── NoteType ────────────────────────────────────────────────────────────────

/// The category of a note. Stored as its upper-case discriminant in the
/// `note_type` column, where a CHECK constraint enforces the set on write.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoteType {
  #[default]
  Misc,
  Event,
  Work,
  Reminder,
  Study,
  Meeting,
}

impl NoteType {
  /// All types, in display order.
  pub const ALL: [NoteType; 6] = [
    Self::Misc,
    Self::Event,
    Self::Work,
    Self::Reminder,
    Self::Study,
    Self::Meeting,
  ];

  /// The discriminant string stored in the `note_type` column.
  /// Must match the `rename_all = "UPPERCASE"` serde tags above.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::Misc => "MISC",
      Self::Event => "EVENT",
      Self::Work => "WORK",
      Self::Reminder => "REMINDER",
      Self::Study => "STUDY",
      Self::Meeting => "MEETING",
    }
  }

  /// Parse the discriminant string read back from the database (or typed on
  /// the command line). Case-sensitive; the column only ever holds the
  /// upper-case forms.
  pub fn from_discriminant(s: &str) -> Result<Self> {
    match s {
      "MISC" => Ok(Self::Misc),
      "EVENT" => Ok(Self::Event),
      "WORK" => Ok(Self::Work),
      "REMINDER" => Ok(Self::Reminder),
      "STUDY" => Ok(Self::Study),
      "MEETING" => Ok(Self::Meeting),
      other => Err(Error::UnknownNoteType(other.to_owned())),
    }
  }
}

// ─── Note ────────────────────────────────────────────────────────────────────

/// A persisted note. `note_id` is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
  pub note_id:     i64,
  pub title:       String,
  pub content:     Option<String>,
  pub note_type:   NoteType,
  /// Set once at insert; never changes afterwards.
  pub created_at:  DateTime<Utc>,
  /// Equal to `created_at` at insert; refreshed by the store on every
  /// update.
  pub modified_at: DateTime<Utc>,
}

// ─── NoteDraft ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::NoteStore::create_note`] and
/// [`crate::store::NoteStore::update_note`]. Identifiers and timestamps are
/// always set by the store; they are not accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDraft {
  pub title:     String,
  pub content:   Option<String>,
  pub note_type: NoteType,
}

impl NoteDraft {
  /// Convenience constructor with no content and the default type.
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title:     title.into(),
      content:   None,
      note_type: NoteType::default(),
    }
  }

  /// Reject drafts whose title is empty or whitespace-only. Stores call
  /// this before touching any row, so a failing save changes nothing.
  pub fn validate(&self) -> Result<()> {
    if self.title.trim().is_empty() {
      return Err(Error::EmptyTitle);
    }
    Ok(())
  }
}
