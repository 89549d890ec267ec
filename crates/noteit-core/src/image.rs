//! Image — a base64-encoded photo owned by exactly one note.
//!
//! Payloads are stored as text in the database; decoding back to bytes is a
//! front-end concern. Deleting the owning note cascades to its images.

use serde::{Deserialize, Serialize};

/// A persisted image. `image_id` is assigned by the store on insert, and
/// insertion order (ascending `image_id`) is the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
  pub image_id: i64,
  pub note_id:  i64,
  /// Base64-encoded photo bytes.
  pub payload:  String,
}
