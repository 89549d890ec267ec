//! The `NoteStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `noteit-store-sqlite`).
//! Front-ends depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  image::Image,
  note::{Note, NoteDraft},
  stats::NoteStats,
};

/// Abstraction over a Note-It storage backend.
///
/// Identifiers and timestamps are assigned by the store; callers supply only
/// a [`NoteDraft`]. Every method that names a note id fails with the
/// backend's not-found error when no such note exists.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// List all notes, newest first (`created_at` descending).
  fn list_notes(
    &self,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  /// Retrieve one note by id. Returns `None` if not found.
  fn get_note(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// Validate and persist a new note, returning it with its store-assigned
  /// id and timestamps (`modified_at == created_at` at this point).
  fn create_note(
    &self,
    draft: NoteDraft,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Overwrite an existing note's title, content, and type. `modified_at`
  /// is refreshed; `created_at` is untouched.
  fn update_note(
    &self,
    id: i64,
    draft: NoteDraft,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Delete a note. Its images are removed by the store's cascading
  /// foreign-key constraint.
  fn delete_note(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Images ────────────────────────────────────────────────────────────

  /// Attach one image (base64 payload) to a note.
  fn add_image(
    &self,
    note_id: i64,
    payload: String,
  ) -> impl Future<Output = Result<Image, Self::Error>> + Send + '_;

  /// List a note's images in insertion order.
  fn list_images(
    &self,
    note_id: i64,
  ) -> impl Future<Output = Result<Vec<Image>, Self::Error>> + Send + '_;

  /// Replace a note's entire image set with `payloads`, atomically: either
  /// the old set survives intact or the new set is fully in place.
  fn replace_images(
    &self,
    note_id: i64,
    payloads: Vec<String>,
  ) -> impl Future<Output = Result<Vec<Image>, Self::Error>> + Send + '_;

  // ── Analytics ─────────────────────────────────────────────────────────

  /// Compute the analytics counters. `today` is passed in (rather than read
  /// from the clock) so the "created today" metric is deterministic.
  fn stats(
    &self,
    today: NaiveDate,
  ) -> impl Future<Output = Result<NoteStats, Self::Error>> + Send + '_;
}
