//! Error type for `noteit-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] noteit_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The operation named a note id with no matching row.
  #[error("note not found: {0}")]
  NoteNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
