//! Analytics counters computed from the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A snapshot of the analytics view. Recomputed from scratch on every
/// request; nothing is cached or persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStats {
  /// Notes whose creation date, truncated to `YYYY-MM-DD`, equals the
  /// requested day.
  pub notes_today:   u64,
  pub total_notes:   u64,
  /// Raw `note_type` column values mapped to counts. Only types with at
  /// least one note appear, and values are not validated against
  /// [`crate::note::NoteType`] — legacy rows count under whatever string
  /// they carry.
  pub notes_by_type: BTreeMap<String, u64>,
  /// Notes whose modification timestamp differs (textually) from their
  /// creation timestamp — the proxy for "edited at least once".
  pub edited_notes:  u64,
  /// Image rows across all notes.
  pub total_images:  u64,
}
