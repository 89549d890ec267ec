//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use noteit_core::{
  note::{NoteDraft, NoteType},
  store::NoteStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn groceries() -> NoteDraft {
  NoteDraft {
    title:     "Groceries".into(),
    content:   Some("milk, eggs".into()),
    note_type: NoteType::Misc,
  }
}

fn standup() -> NoteDraft {
  NoteDraft {
    title:     "Standup".into(),
    content:   None,
    note_type: NoteType::Meeting,
  }
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_note() {
  let s = store().await;

  let note = s.create_note(groceries()).await.unwrap();
  assert_eq!(note.title, "Groceries");
  assert_eq!(note.content.as_deref(), Some("milk, eggs"));
  assert_eq!(note.note_type, NoteType::Misc);
  assert_eq!(note.modified_at, note.created_at);
  assert!(note.created_at <= Utc::now());

  let fetched = s.get_note(note.note_id).await.unwrap().unwrap();
  assert_eq!(fetched.note_id, note.note_id);
  assert_eq!(fetched.title, "Groceries");
  assert_eq!(fetched.content.as_deref(), Some("milk, eggs"));
  assert_eq!(fetched.note_type, NoteType::Misc);
  assert_eq!(fetched.created_at, note.created_at);
}

#[tokio::test]
async fn get_note_missing_returns_none() {
  let s = store().await;
  assert!(s.get_note(42).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_empty_title() {
  let s = store().await;

  let err = s.create_note(NoteDraft::new("")).await.unwrap_err();
  assert!(matches!(err, Error::Core(noteit_core::Error::EmptyTitle)));

  let err = s.create_note(NoteDraft::new("   ")).await.unwrap_err();
  assert!(matches!(err, Error::Core(noteit_core::Error::EmptyTitle)));

  // Nothing was written.
  assert!(s.list_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_notes_newest_first() {
  let s = store().await;

  let first  = s.create_note(groceries()).await.unwrap();
  let second = s.create_note(standup()).await.unwrap();

  let notes = s.list_notes().await.unwrap();
  assert_eq!(notes.len(), 2);
  assert_eq!(notes[0].note_id, second.note_id);
  assert_eq!(notes[0].title, "Standup");
  assert_eq!(notes[1].note_id, first.note_id);
  assert_eq!(notes[1].title, "Groceries");
}

#[tokio::test]
async fn update_note_refreshes_modified_at() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();

  let updated = s
    .update_note(
      note.note_id,
      NoteDraft {
        title:     "Groceries (weekend)".into(),
        content:   Some("milk, eggs, flour".into()),
        note_type: NoteType::Reminder,
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.note_id, note.note_id);
  assert_eq!(updated.title, "Groceries (weekend)");
  assert_eq!(updated.note_type, NoteType::Reminder);
  assert_eq!(updated.created_at, note.created_at);
  assert_ne!(updated.modified_at, updated.created_at);
  assert!(updated.modified_at >= updated.created_at);

  // The persisted row agrees with the returned value.
  let fetched = s.get_note(note.note_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Groceries (weekend)");
  assert_eq!(fetched.created_at, note.created_at);
  assert_eq!(fetched.modified_at, updated.modified_at);
}

#[tokio::test]
async fn update_missing_note_errors() {
  let s = store().await;
  let err = s.update_note(42, groceries()).await.unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(42)));
}

#[tokio::test]
async fn update_rejects_empty_title() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();

  let err = s
    .update_note(note.note_id, NoteDraft::new("  "))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(noteit_core::Error::EmptyTitle)));

  // The row is untouched.
  let fetched = s.get_note(note.note_id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Groceries");
  assert_eq!(fetched.modified_at, note.modified_at);
}

#[tokio::test]
async fn delete_note_cascades_to_images() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();
  s.add_image(note.note_id, "aGVsbG8=".into()).await.unwrap();
  s.add_image(note.note_id, "d29ybGQ=".into()).await.unwrap();

  s.delete_note(note.note_id).await.unwrap();

  assert!(s.list_notes().await.unwrap().is_empty());
  assert!(s.list_images(note.note_id).await.unwrap().is_empty());

  let stats = s.stats(Utc::now().date_naive()).await.unwrap();
  assert_eq!(stats.total_images, 0);
}

#[tokio::test]
async fn delete_missing_note_errors() {
  let s = store().await;
  let err = s.delete_note(42).await.unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(42)));
}

// ─── Images ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_image_and_list_in_order() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();

  let a = s.add_image(note.note_id, "QQ==".into()).await.unwrap();
  let b = s.add_image(note.note_id, "Qg==".into()).await.unwrap();
  let c = s.add_image(note.note_id, "Qw==".into()).await.unwrap();

  let images = s.list_images(note.note_id).await.unwrap();
  assert_eq!(
    images.iter().map(|i| i.image_id).collect::<Vec<_>>(),
    vec![a.image_id, b.image_id, c.image_id]
  );
  assert_eq!(
    images.iter().map(|i| i.payload.as_str()).collect::<Vec<_>>(),
    vec!["QQ==", "Qg==", "Qw=="]
  );
  assert!(images.iter().all(|i| i.note_id == note.note_id));
}

#[tokio::test]
async fn add_image_to_missing_note_errors() {
  let s = store().await;
  let err = s.add_image(42, "QQ==".into()).await.unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(42)));
}

#[tokio::test]
async fn replace_images_swaps_whole_set() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();
  s.add_image(note.note_id, "QQ==".into()).await.unwrap();
  s.add_image(note.note_id, "Qg==".into()).await.unwrap();

  let replaced = s
    .replace_images(note.note_id, vec!["Qw==".into(), "RA==".into(), "RQ==".into()])
    .await
    .unwrap();
  assert_eq!(replaced.len(), 3);

  let images = s.list_images(note.note_id).await.unwrap();
  assert_eq!(
    images.iter().map(|i| i.payload.as_str()).collect::<Vec<_>>(),
    vec!["Qw==", "RA==", "RQ=="]
  );
}

#[tokio::test]
async fn replace_images_with_empty_clears() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();
  s.add_image(note.note_id, "QQ==".into()).await.unwrap();

  let replaced = s.replace_images(note.note_id, vec![]).await.unwrap();
  assert!(replaced.is_empty());
  assert!(s.list_images(note.note_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_images_on_missing_note_errors() {
  let s = store().await;
  let err = s.replace_images(42, vec!["QQ==".into()]).await.unwrap_err();
  assert!(matches!(err, Error::NoteNotFound(42)));
}

#[tokio::test]
async fn images_do_not_leak_across_notes() {
  let s = store().await;
  let a = s.create_note(groceries()).await.unwrap();
  let b = s.create_note(standup()).await.unwrap();
  s.add_image(a.note_id, "QQ==".into()).await.unwrap();
  s.add_image(b.note_id, "Qg==".into()).await.unwrap();

  s.replace_images(a.note_id, vec!["Qw==".into()]).await.unwrap();

  let b_images = s.list_images(b.note_id).await.unwrap();
  assert_eq!(b_images.len(), 1);
  assert_eq!(b_images[0].payload, "Qg==");
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_by_type_sums_to_total() {
  let s = store().await;
  s.create_note(groceries()).await.unwrap();
  s.create_note(standup()).await.unwrap();
  let third = s.create_note(NoteDraft::new("Scratch")).await.unwrap();
  s.add_image(third.note_id, "QQ==".into()).await.unwrap();

  let stats = s.stats(Utc::now().date_naive()).await.unwrap();
  assert_eq!(stats.total_notes, 3);
  assert_eq!(stats.notes_by_type.get("MISC"), Some(&2));
  assert_eq!(stats.notes_by_type.get("MEETING"), Some(&1));
  assert_eq!(
    stats.notes_by_type.values().sum::<u64>(),
    stats.total_notes
  );
  assert_eq!(stats.total_images, 1);
}

#[tokio::test]
async fn stats_today_matches_creation_date() {
  let s = store().await;
  let first = s.create_note(groceries()).await.unwrap();
  s.create_note(standup()).await.unwrap();

  let today = first.created_at.date_naive();
  let stats = s.stats(today).await.unwrap();
  assert_eq!(stats.notes_today, 2);

  // A different day counts nothing.
  let other = today.pred_opt().unwrap();
  let stats = s.stats(other).await.unwrap();
  assert_eq!(stats.notes_today, 0);
}

#[tokio::test]
async fn stats_edited_counts_updated_notes() {
  let s = store().await;
  let note = s.create_note(groceries()).await.unwrap();
  s.create_note(standup()).await.unwrap();

  let stats = s.stats(Utc::now().date_naive()).await.unwrap();
  assert_eq!(stats.edited_notes, 0);

  s.update_note(note.note_id, standup()).await.unwrap();

  let stats = s.stats(Utc::now().date_naive()).await.unwrap();
  assert_eq!(stats.edited_notes, 1);
}

// ─── Example scenario from the product notes ─────────────────────────────────

#[tokio::test]
async fn groceries_then_standup_then_delete() {
  let s = store().await;
  let today = Utc::now().date_naive();

  let g = s.create_note(groceries()).await.unwrap();
  let stats = s.stats(today).await.unwrap();
  assert_eq!(stats.notes_by_type.get("MISC"), Some(&1));

  s.create_note(standup()).await.unwrap();
  let notes = s.list_notes().await.unwrap();
  assert_eq!(notes.len(), 2);
  assert_eq!(notes[0].title, "Standup");

  let stats = s.stats(today).await.unwrap();
  assert_eq!(stats.notes_by_type.get("MISC"), Some(&1));
  assert_eq!(stats.notes_by_type.get("MEETING"), Some(&1));

  s.delete_note(g.note_id).await.unwrap();
  let notes = s.list_notes().await.unwrap();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].title, "Standup");
}
