//! Image acquisition — the file-based stand-in for a camera or gallery
//! picker.
//!
//! Acquisition is an explicit async task that completes before any store
//! write begins. A dismissed prompt is a distinct outcome, not an error.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// The result of asking the user for an image.
#[derive(Debug)]
pub enum AcquireOutcome {
  /// A file was read and base64-encoded.
  Acquired(String),
  /// The user dismissed the prompt without choosing a file.
  Cancelled,
}

/// Acquire one image: from `path` when given, otherwise via an interactive
/// prompt where an empty line cancels.
pub async fn acquire(path: Option<&Path>) -> anyhow::Result<AcquireOutcome> {
  let path = match path {
    Some(p) => p.to_path_buf(),
    None => match prompt_for_path()? {
      Some(p) => p,
      None => return Ok(AcquireOutcome::Cancelled),
    },
  };

  Ok(AcquireOutcome::Acquired(load_image(&path).await?))
}

/// Read `path` and base64-encode its bytes.
pub async fn load_image(path: &Path) -> anyhow::Result<String> {
  let bytes = tokio::fs::read(path)
    .await
    .with_context(|| format!("failed to read image {path:?}"))?;
  Ok(STANDARD.encode(bytes))
}

/// Decode a stored payload back to raw bytes.
pub fn decode_payload(payload: &str) -> anyhow::Result<Vec<u8>> {
  STANDARD
    .decode(payload)
    .context("image payload is not valid base64")
}

/// Ask for an image path on stdin. `None` means the prompt was dismissed.
fn prompt_for_path() -> anyhow::Result<Option<PathBuf>> {
  use std::io::{self, BufRead, Write};
  print!("Image path (empty to cancel): ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let trimmed = line.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  Ok(Some(PathBuf::from(trimmed)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn load_image_encodes_file_bytes() {
    let path = std::env::temp_dir().join("noteit-acquire-test.bin");
    tokio::fs::write(&path, b"abc").await.unwrap();

    let payload = load_image(&path).await.unwrap();
    assert_eq!(payload, "YWJj");
    assert_eq!(decode_payload(&payload).unwrap(), b"abc");

    tokio::fs::remove_file(&path).await.ok();
  }

  #[tokio::test]
  async fn load_image_missing_file_errors() {
    let path = std::env::temp_dir().join("noteit-acquire-missing.bin");
    assert!(load_image(&path).await.is_err());
  }

  #[test]
  fn decode_payload_rejects_garbage() {
    assert!(decode_payload("not base64!!!").is_err());
  }
}
