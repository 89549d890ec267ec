//! Subcommand implementations.
//!
//! Every command takes the store as an explicit argument; nothing here
//! holds global state. Store errors propagate as `anyhow::Error` and are
//! rendered once, at the top level.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chrono::Utc;
use noteit_core::{
  note::{Note, NoteDraft, NoteType},
  stats::NoteStats,
  store::NoteStore,
};

use crate::acquire::{self, AcquireOutcome};

// ─── List ─────────────────────────────────────────────────────────────────────

pub async fn list<S: NoteStore>(store: &S, json: bool) -> anyhow::Result<()> {
  let notes = store.list_notes().await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&notes)?);
    return Ok(());
  }

  if notes.is_empty() {
    println!("no notes");
    return Ok(());
  }

  for note in &notes {
    let images = store.list_images(note.note_id).await?;
    println!("{}", summary_line(note, images.len()));
  }
  Ok(())
}

// ─── Show ─────────────────────────────────────────────────────────────────────

pub async fn show<S: NoteStore>(
  store: &S,
  id: i64,
  json: bool,
) -> anyhow::Result<()> {
  let Some(note) = store.get_note(id).await? else {
    bail!("note {id} not found");
  };
  let images = store.list_images(id).await?;

  if json {
    let out = serde_json::json!({ "note": note, "images": images });
    println!("{}", serde_json::to_string_pretty(&out)?);
    return Ok(());
  }

  println!("{}", summary_line(&note, images.len()));
  if let Some(content) = &note.content {
    println!("\n{content}");
  }
  println!("\ncreated:  {}", note.created_at.to_rfc3339());
  println!("modified: {}", note.modified_at.to_rfc3339());
  Ok(())
}

// ─── Add ──────────────────────────────────────────────────────────────────────

pub async fn add<S: NoteStore>(
  store: &S,
  draft: NoteDraft,
  images: Vec<PathBuf>,
) -> anyhow::Result<()> {
  // Surface the validation message before reading any image file or
  // touching the store.
  draft.validate()?;

  // All files are read and encoded before the first store write.
  let mut payloads = Vec::with_capacity(images.len());
  for path in &images {
    payloads.push(acquire::load_image(path).await?);
  }

  let note = store.create_note(draft).await?;
  for payload in payloads {
    store.add_image(note.note_id, payload).await?;
  }

  println!("created note #{}", note.note_id);
  if !images.is_empty() {
    println!("attached {} image(s)", images.len());
  }
  Ok(())
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

pub async fn edit<S: NoteStore>(
  store: &S,
  id: i64,
  title: Option<String>,
  content: Option<String>,
  note_type: Option<NoteType>,
  images: Vec<PathBuf>,
  clear_images: bool,
) -> anyhow::Result<()> {
  let Some(existing) = store.get_note(id).await? else {
    bail!("note {id} not found");
  };

  let draft = NoteDraft {
    title:     title.unwrap_or(existing.title),
    content:   content.or(existing.content),
    note_type: note_type.unwrap_or(existing.note_type),
  };
  draft.validate()?;

  let mut payloads = Vec::with_capacity(images.len());
  for path in &images {
    payloads.push(acquire::load_image(path).await?);
  }

  let note = store.update_note(id, draft).await?;

  if clear_images {
    store.replace_images(id, Vec::new()).await?;
    println!("cleared images on note #{}", note.note_id);
  } else if !payloads.is_empty() {
    let replaced = store.replace_images(id, payloads).await?;
    println!(
      "replaced images on note #{} ({} image(s))",
      note.note_id,
      replaced.len()
    );
  }

  println!("updated note #{}", note.note_id);
  Ok(())
}

// ─── Attach ───────────────────────────────────────────────────────────────────

pub async fn attach<S: NoteStore>(
  store: &S,
  id: i64,
  path: Option<PathBuf>,
) -> anyhow::Result<()> {
  if store.get_note(id).await?.is_none() {
    bail!("note {id} not found");
  }

  match acquire::acquire(path.as_deref()).await? {
    AcquireOutcome::Cancelled => {
      println!("cancelled; nothing attached");
    }
    AcquireOutcome::Acquired(payload) => {
      let image = store.add_image(id, payload).await?;
      println!("attached image #{} to note #{id}", image.image_id);
    }
  }
  Ok(())
}

// ─── Images ───────────────────────────────────────────────────────────────────

pub async fn images<S: NoteStore>(
  store: &S,
  id: i64,
  export_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
  if store.get_note(id).await?.is_none() {
    bail!("note {id} not found");
  }
  let images = store.list_images(id).await?;

  if images.is_empty() {
    println!("note #{id} has no images");
    return Ok(());
  }

  for image in &images {
    println!(
      "image #{} ({} base64 chars)",
      image.image_id,
      image.payload.len()
    );
  }

  if let Some(dir) = export_dir {
    tokio::fs::create_dir_all(&dir)
      .await
      .with_context(|| format!("failed to create {dir:?}"))?;
    for image in &images {
      let bytes = acquire::decode_payload(&image.payload)?;
      let target = dir.join(format!("image-{}.bin", image.image_id));
      tokio::fs::write(&target, bytes)
        .await
        .with_context(|| format!("failed to write {target:?}"))?;
    }
    println!("exported {} image(s) to {}", images.len(), dir.display());
  }
  Ok(())
}

// ─── Rm ───────────────────────────────────────────────────────────────────────

pub async fn rm<S: NoteStore>(store: &S, id: i64, yes: bool) -> anyhow::Result<()> {
  let Some(note) = store.get_note(id).await? else {
    bail!("note {id} not found");
  };

  if !yes && !confirm(&format!("Delete note #{} ({:?})?", id, note.title))? {
    println!("aborted");
    return Ok(());
  }

  store.delete_note(id).await?;
  println!("deleted note #{id}");
  Ok(())
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` declines.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
  use std::io::{self, BufRead, Write};
  print!("{prompt} [y/N]: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  let answer = line.trim().to_ascii_lowercase();
  Ok(answer == "y" || answer == "yes")
}

// ─── Stats ────────────────────────────────────────────────────────────────────

pub async fn stats<S: NoteStore>(store: &S, json: bool) -> anyhow::Result<()> {
  let stats = store.stats(Utc::now().date_naive()).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&stats)?);
    return Ok(());
  }

  print!("{}", render_stats(&stats));
  Ok(())
}

// ─── Rendering helpers ────────────────────────────────────────────────────────

fn summary_line(note: &Note, image_count: usize) -> String {
  let mut line = format!(
    "#{} [{}] {} ({})",
    note.note_id,
    note.note_type.discriminant(),
    note.title,
    note.created_at.format("%Y-%m-%d %H:%M"),
  );
  if image_count > 0 {
    line.push_str(&format!(" [{image_count} image(s)]"));
  }
  line
}

fn render_stats(stats: &NoteStats) -> String {
  let mut out = String::new();
  out.push_str(&format!("Notes created today:  {}\n", stats.notes_today));
  out.push_str(&format!("Total notes:          {}\n", stats.total_notes));
  out.push_str("Notes by type:\n");
  for (note_type, count) in &stats.notes_by_type {
    out.push_str(&format!("  {note_type:<10} {count}\n"));
  }
  out.push_str(&format!("Edited at least once: {}\n", stats.edited_notes));
  out.push_str(&format!("Total images:         {}\n", stats.total_images));
  out
}
