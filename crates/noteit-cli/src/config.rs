//! CLI configuration.
//!
//! Settings come from a TOML file merged with `NOTEIT_`-prefixed
//! environment variables (e.g. `NOTEIT_STORE_PATH`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime configuration for the `noteit` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// Location of the SQLite database file. A leading `~` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
  PathBuf::from("~/.local/share/noteit/noteit.db")
}

impl CliConfig {
  /// Load configuration from `path` (missing file is fine — defaults and
  /// environment variables still apply).
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("NOTEIT"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: CliConfig = settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expand_tilde_leaves_plain_paths_alone() {
    assert_eq!(
      expand_tilde(Path::new("/tmp/notes.db")),
      PathBuf::from("/tmp/notes.db")
    );
    assert_eq!(
      expand_tilde(Path::new("relative/notes.db")),
      PathBuf::from("relative/notes.db")
    );
  }

  #[test]
  fn expand_tilde_resolves_home() {
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/notes.db")),
        PathBuf::from(home).join("notes.db")
      );
    }
  }
}
