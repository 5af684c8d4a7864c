//! Integration tests for the tag repository

mod common;

use quill::database::models::{Note, SearchFilters, ShareGrant, Tag};
use quill::database::types::Permission;
use quill::Error;

#[tokio::test]
async fn tag_names_normalize_to_one_entry() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let first = Tag::get_or_create(*alice.id, "Work", &db).await.unwrap();
    let second = Tag::get_or_create(*alice.id, "  work  ", &db).await.unwrap();
    assert_eq!(*first.id, *second.id);
    assert_eq!(first.name, "work");

    let all = Tag::list_for_owner(*alice.id, &db).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn vocabularies_are_per_user() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;

    let alices = Tag::get_or_create(*alice.id, "work", &db).await.unwrap();
    let bobs = Tag::get_or_create(*bob.id, "work", &db).await.unwrap();
    assert_ne!(*alices.id, *bobs.id);

    // Neither can see or delete the other's tag.
    assert!(Tag::get(*alices.id, *bob.id, &db).await.unwrap().is_none());
    assert!(matches!(
        Tag::delete(*alices.id, *bob.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
}

#[tokio::test]
async fn tag_search_requires_every_tag() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let both = common::create_note(&db, &alice, "Both", "body", &["work", "urgent"]).await;
    common::create_note(&db, &alice, "Only work", "body", &["work"]).await;
    common::create_note(&db, &alice, "Only urgent", "body", &["urgent"]).await;
    common::create_note(&db, &alice, "Neither", "body", &[]).await;

    let filters = SearchFilters {
        tags: vec!["work".to_string(), "urgent".to_string()],
        ..Default::default()
    };
    let (found, total) = Note::search(*alice.id, &filters, 1, 20, &db).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(*found[0].note.id, *both.note.id);
}

#[tokio::test]
async fn attaching_is_idempotent_and_skips_blanks() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let note = common::create_note(&db, &alice, "Note", "body", &["work"]).await;

    let tags = vec!["work".to_string(), "  ".to_string(), "Urgent".to_string()];
    let updated = Note::attach_tags(*note.note.id, *alice.id, &tags, &db)
        .await
        .unwrap();
    assert_eq!(updated.tags, vec!["urgent".to_string(), "work".to_string()]);
}

#[tokio::test]
async fn detach_requires_edit_access() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Note", "body", &["work"]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();
    assert!(matches!(
        Tag::detach_from_note(*note.note.id, *bob.id, "work", &db)
            .await
            .unwrap_err(),
        Error::NotFoundOrDenied
    ));

    Tag::detach_from_note(*note.note.id, *alice.id, "work", &db)
        .await
        .unwrap();
    let note = Note::get_with_tags(*note.note.id, *alice.id, &db).await.unwrap();
    assert!(note.tags.is_empty());

    // Detaching an absent tag is a no-op.
    Tag::detach_from_note(*note.note.id, *alice.id, "work", &db)
        .await
        .unwrap();
}

#[tokio::test]
async fn note_count_tracks_live_notes_only() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let a = common::create_note(&db, &alice, "A", "body", &["work"]).await;
    common::create_note(&db, &alice, "B", "body", &["work"]).await;
    let tag = Tag::get_or_create(*alice.id, "work", &db).await.unwrap();

    assert_eq!(Tag::note_count(*tag.id, *alice.id, &db).await.unwrap(), 2);

    Note::soft_delete(*a.note.id, *alice.id, &db).await.unwrap();
    assert_eq!(Tag::note_count(*tag.id, *alice.id, &db).await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_a_tag_clears_its_note_links() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let note = common::create_note(&db, &alice, "Note", "body", &["work", "urgent"]).await;
    let tag = Tag::get_or_create(*alice.id, "work", &db).await.unwrap();

    Tag::delete(*tag.id, *alice.id, &db).await.unwrap();

    let note = Note::get_with_tags(*note.note.id, *alice.id, &db).await.unwrap();
    assert_eq!(note.tags, vec!["urgent".to_string()]);
}
