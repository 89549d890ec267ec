//! noteit — command-line front-end for the Note-It store.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and dispatches to one subcommand per screen of the
//! original app: `list`/`show`/`add`/`edit`/`rm` for the note screens,
//! `attach`/`images` for the photo flows, `stats` for analytics.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use noteit_core::note::{NoteDraft, NoteType};
use noteit_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod acquire;
mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(author, version, about = "Local note store with attached images")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List all notes, newest first.
  List {
    #[arg(long)]
    json: bool,
  },

  /// Show one note and its images.
  Show {
    id: i64,
    #[arg(long)]
    json: bool,
  },

  /// Create a note.
  Add {
    #[arg(short, long)]
    title: String,

    #[arg(short = 'c', long)]
    content: Option<String>,

    /// One of MISC, EVENT, WORK, REMINDER, STUDY, MEETING.
    #[arg(long = "type", default_value = "MISC", value_parser = parse_note_type)]
    note_type: NoteType,

    /// Image file to attach; may be repeated.
    #[arg(long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,
  },

  /// Edit an existing note. Unset fields keep their current values.
  Edit {
    id: i64,

    #[arg(short, long)]
    title: Option<String>,

    #[arg(short = 'c', long)]
    content: Option<String>,

    /// One of MISC, EVENT, WORK, REMINDER, STUDY, MEETING.
    #[arg(long = "type", value_parser = parse_note_type)]
    note_type: Option<NoteType>,

    /// Replace the note's whole image set with these files; may be
    /// repeated.
    #[arg(long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,

    /// Replace the note's image set with nothing.
    #[arg(long, conflicts_with = "images")]
    clear_images: bool,
  },

  /// Attach one image to a note.
  Attach {
    id: i64,

    /// Image file; prompts interactively when omitted.
    path: Option<PathBuf>,
  },

  /// List a note's images.
  Images {
    id: i64,

    /// Decode payloads and write one file per image into this directory.
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
  },

  /// Delete a note and, by cascade, its images.
  Rm {
    id: i64,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },

  /// Show the analytics counters.
  Stats {
    #[arg(long)]
    json: bool,
  },
}

fn parse_note_type(s: &str) -> Result<NoteType, String> {
  NoteType::from_discriminant(&s.to_ascii_uppercase()).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing. Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.command {
    Command::List { json } => commands::list(&store, json).await,
    Command::Show { id, json } => commands::show(&store, id, json).await,
    Command::Add {
      title,
      content,
      note_type,
      images,
    } => {
      let draft = NoteDraft {
        title,
        content,
        note_type,
      };
      commands::add(&store, draft, images).await
    }
    Command::Edit {
      id,
      title,
      content,
      note_type,
      images,
      clear_images,
    } => {
      commands::edit(&store, id, title, content, note_type, images, clear_images)
        .await
    }
    Command::Attach { id, path } => commands::attach(&store, id, path).await,
    Command::Images { id, export_dir } => {
      commands::images(&store, id, export_dir).await
    }
    Command::Rm { id, yes } => commands::rm(&store, id, yes).await,
    Command::Stats { json } => commands::stats(&store, json).await,
  }
}
