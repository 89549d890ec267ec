//! [`SqliteStore`] — the SQLite implementation of [`NoteStore`].

use std::{collections::BTreeMap, path::Path};

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;

use noteit_core::{
  image::Image,
  note::{Note, NoteDraft},
  stats::NoteStats,
  store::NoteStore,
};

use crate::{
  Error, Result,
  encode::{RawNote, decode_dt, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Note-It store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and all
/// statements run sequentially on its dedicated database thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = Error;

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn list_notes(&self) -> Result<Vec<Note>> {
    let raws: Vec<RawNote> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT note_id, title, content, note_type, created_at, modified_at
           FROM notes
           ORDER BY created_at DESC, note_id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| RawNote::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn get_note(&self, id: i64) -> Result<Option<Note>> {
    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT note_id, title, content, note_type, created_at, modified_at
               FROM notes WHERE note_id = ?1",
              rusqlite::params![id],
              |row| RawNote::from_row(row),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNote::into_note).transpose()
  }

  async fn create_note(&self, draft: NoteDraft) -> Result<Note> {
    draft.validate()?;

    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let title      = draft.title.clone();
    let content    = draft.content.clone();
    let type_str   = draft.note_type.discriminant();

    let note_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notes (title, content, note_type, created_at, modified_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![title, content, type_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(note_id, "note created");

    Ok(Note {
      note_id,
      title: draft.title,
      content: draft.content,
      note_type: draft.note_type,
      created_at,
      modified_at: created_at,
    })
  }

  async fn update_note(&self, id: i64, draft: NoteDraft) -> Result<Note> {
    draft.validate()?;

    let modified_at  = Utc::now();
    let modified_str = encode_dt(modified_at);
    let title        = draft.title.clone();
    let content      = draft.content.clone();
    let type_str     = draft.note_type.discriminant();

    // Read created_at and overwrite in one trip to the database thread.
    let created_str: Option<String> = self
      .conn
      .call(move |conn| {
        let created: Option<String> = conn
          .query_row(
            "SELECT created_at FROM notes WHERE note_id = ?1",
            rusqlite::params![id],
            |row| row.get(0),
          )
          .optional()?;

        if created.is_some() {
          conn.execute(
            "UPDATE notes
             SET title = ?1, content = ?2, note_type = ?3, modified_at = ?4
             WHERE note_id = ?5",
            rusqlite::params![title, content, type_str, modified_str, id],
          )?;
        }
        Ok(created)
      })
      .await?;

    let created_str = created_str.ok_or(Error::NoteNotFound(id))?;
    let created_at  = decode_dt(&created_str)?;

    tracing::debug!(note_id = id, "note updated");

    Ok(Note {
      note_id: id,
      title: draft.title,
      content: draft.content,
      note_type: draft.note_type,
      created_at,
      modified_at,
    })
  }

  async fn delete_note(&self, id: i64) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM notes WHERE note_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::NoteNotFound(id));
    }

    tracing::debug!(note_id = id, "note deleted");
    Ok(())
  }

  // ── Images ────────────────────────────────────────────────────────────────

  async fn add_image(&self, note_id: i64, payload: String) -> Result<Image> {
    let stored = payload.clone();

    let image_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM notes WHERE note_id = ?1",
            rusqlite::params![note_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO images (note_id, payload) VALUES (?1, ?2)",
          rusqlite::params![note_id, stored],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    let image_id = image_id.ok_or(Error::NoteNotFound(note_id))?;

    tracing::debug!(note_id, image_id, "image attached");

    Ok(Image {
      image_id,
      note_id,
      payload,
    })
  }

  async fn list_images(&self, note_id: i64) -> Result<Vec<Image>> {
    let images: Vec<Image> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT image_id, note_id, payload FROM images
           WHERE note_id = ?1
           ORDER BY image_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![note_id], |row| {
            Ok(Image {
              image_id: row.get(0)?,
              note_id:  row.get(1)?,
              payload:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(images)
  }

  async fn replace_images(
    &self,
    note_id: i64,
    payloads: Vec<String>,
  ) -> Result<Vec<Image>> {
    // Delete-then-reinsert runs inside one transaction: a failure partway
    // rolls back, so the note can never be left with a half-written set.
    let images: Option<Vec<Image>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
          .query_row(
            "SELECT 1 FROM notes WHERE note_id = ?1",
            rusqlite::params![note_id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(None);
        }

        tx.execute(
          "DELETE FROM images WHERE note_id = ?1",
          rusqlite::params![note_id],
        )?;

        let mut images = Vec::with_capacity(payloads.len());
        {
          let mut stmt = tx
            .prepare("INSERT INTO images (note_id, payload) VALUES (?1, ?2)")?;
          for payload in payloads {
            stmt.execute(rusqlite::params![note_id, &payload])?;
            images.push(Image {
              image_id: tx.last_insert_rowid(),
              note_id,
              payload,
            });
          }
        }

        tx.commit()?;
        Ok(Some(images))
      })
      .await?;

    let images = images.ok_or(Error::NoteNotFound(note_id))?;

    tracing::debug!(note_id, count = images.len(), "image set replaced");
    Ok(images)
  }

  // ── Analytics ─────────────────────────────────────────────────────────────

  async fn stats(&self, today: NaiveDate) -> Result<NoteStats> {
    let today_str = today.format("%Y-%m-%d").to_string();

    let stats = self
      .conn
      .call(move |conn| {
        let notes_today: u64 = conn.query_row(
          "SELECT COUNT(*) FROM notes WHERE DATE(created_at) = ?1",
          rusqlite::params![today_str],
          |row| row.get(0),
        )?;

        let total_notes: u64 =
          conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;

        // Keyed by the raw column value: rows predating the CHECK
        // constraint still count under whatever string they carry.
        let mut notes_by_type = BTreeMap::new();
        {
          let mut stmt = conn
            .prepare("SELECT note_type, COUNT(*) FROM notes GROUP BY note_type")?;
          let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
          })?;
          for row in rows {
            let (note_type, count) = row?;
            notes_by_type.insert(note_type, count);
          }
        }

        let edited_notes: u64 = conn.query_row(
          "SELECT COUNT(*) FROM notes WHERE created_at != modified_at",
          [],
          |row| row.get(0),
        )?;

        let total_images: u64 =
          conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;

        Ok(NoteStats {
          notes_today,
          total_notes,
          notes_by_type,
          edited_notes,
          total_images,
        })
      })
      .await?;

    Ok(stats)
  }
}
