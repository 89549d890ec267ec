//! Error types for `noteit-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The title was empty or whitespace-only; nothing is written.
  #[error("note title must not be empty")]
  EmptyTitle,

  #[error("unknown note type: {0:?}")]
  UnknownNoteType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
