//! Integration tests for the note repository

mod common;

use quill::database::models::{Note, NotePatch, SearchFilters};
use quill::Error;

#[tokio::test]
async fn create_trims_and_validates() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let note = Note::create(*alice.id, "  Title  ", "  body  ", None, &[], &db)
        .await
        .unwrap();
    assert_eq!(note.note.title, "Title");
    assert_eq!(note.note.content, "body");

    let err = Note::create(*alice.id, "   ", "body", None, &[], &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn soft_deleted_notes_are_invisible_everywhere() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let kept = common::create_note(&db, &alice, "Kept", "alpha", &[]).await;
    let doomed = common::create_note(&db, &alice, "Doomed", "beta", &[]).await;

    Note::soft_delete(*doomed.note.id, *alice.id, &db).await.unwrap();

    assert!(matches!(
        Note::get_with_tags(*doomed.note.id, *alice.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));

    let (listed, total) = Note::list_for_owner(*alice.id, 1, 20, &db).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(*listed[0].note.id, *kept.note.id);

    let (found, total) = Note::search(*alice.id, &SearchFilters::default(), 1, 20, &db)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(*found[0].note.id, *kept.note.id);

    // Deleting again is not a silent no-op; the row is already gone.
    assert!(matches!(
        Note::soft_delete(*doomed.note.id, *alice.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
}

#[tokio::test]
async fn only_the_owner_can_soft_delete() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Mine", "body", &[]).await;

    assert!(matches!(
        Note::soft_delete(*note.note.id, *bob.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
}

#[tokio::test]
async fn empty_search_matches_list() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    for i in 0..5 {
        common::create_note(&db, &alice, &format!("Note {i}"), "body", &[]).await;
    }

    let (listed, list_total) = Note::list_for_owner(*alice.id, 1, 3, &db).await.unwrap();
    let (found, search_total) = Note::search(*alice.id, &SearchFilters::default(), 1, 3, &db)
        .await
        .unwrap();

    assert_eq!(list_total, search_total);
    let list_ids: Vec<_> = listed.iter().map(|n| *n.note.id).collect();
    let search_ids: Vec<_> = found.iter().map(|n| *n.note.id).collect();
    assert_eq!(list_ids, search_ids);
}

#[tokio::test]
async fn full_text_search_covers_title_and_content() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let by_title = common::create_note(&db, &alice, "Quarterly roadmap", "nothing else", &[]).await;
    let by_content = common::create_note(&db, &alice, "Misc", "the roadmap lives here", &[]).await;
    common::create_note(&db, &alice, "Groceries", "milk and eggs", &[]).await;

    let filters = SearchFilters {
        query: Some("roadmap".to_string()),
        ..Default::default()
    };
    let (found, total) = Note::search(*alice.id, &filters, 1, 20, &db).await.unwrap();
    assert_eq!(total, 2);
    let ids: Vec<_> = found.iter().map(|n| *n.note.id).collect();
    assert!(ids.contains(&*by_title.note.id));
    assert!(ids.contains(&*by_content.note.id));
}

#[tokio::test]
async fn search_never_crosses_owners() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;

    common::create_note(&db, &alice, "Secret plan", "alpha", &[]).await;
    common::create_note(&db, &bob, "Secret snack", "beta", &[]).await;

    let filters = SearchFilters {
        query: Some("secret".to_string()),
        ..Default::default()
    };
    let (found, total) = Note::search(*bob.id, &filters, 1, 20, &db).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].note.title, "Secret snack");
}

#[tokio::test]
async fn workspace_patch_is_tri_state() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    let note = Note::create(*alice.id, "Paper", "draft", Some(*ws.id), &[], &db)
        .await
        .unwrap();
    assert_eq!(note.note.workspace_id.map(|w| *w), Some(*ws.id));

    // Absent field leaves the workspace untouched.
    let patch = NotePatch {
        title: Some("Paper v2".to_string()),
        ..Default::default()
    };
    let updated = Note::update(*note.note.id, *alice.id, patch, &db).await.unwrap();
    assert_eq!(updated.note.workspace_id.map(|w| *w), Some(*ws.id));

    // Explicit null detaches.
    let patch = NotePatch {
        workspace_id: Some(None),
        ..Default::default()
    };
    let updated = Note::update(*note.note.id, *alice.id, patch, &db).await.unwrap();
    assert_eq!(updated.note.workspace_id, None);

    // Explicit value re-attaches.
    let patch = NotePatch {
        workspace_id: Some(Some(*ws.id)),
        ..Default::default()
    };
    let updated = Note::update(*note.note.id, *alice.id, patch, &db).await.unwrap();
    assert_eq!(updated.note.workspace_id.map(|w| *w), Some(*ws.id));
}

#[tokio::test]
async fn empty_patch_does_not_bump_updated_at() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let note = common::create_note(&db, &alice, "Still", "life", &[]).await;

    let unchanged = Note::update(*note.note.id, *alice.id, NotePatch::default(), &db)
        .await
        .unwrap();
    assert_eq!(unchanged.note.updated_at, note.note.updated_at);
}

#[tokio::test]
async fn create_into_foreign_workspace_fails_without_a_note() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let bobs_ws = common::create_workspace(&db, &bob, "Bob's").await;

    let err = Note::create(*alice.id, "Sneaky", "body", Some(*bobs_ws.id), &[], &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundOrDenied));

    let (_, total) = Note::list_for_owner(*alice.id, 1, 20, &db).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn moving_a_note_into_a_foreign_workspace_fails() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let bobs_ws = common::create_workspace(&db, &bob, "Bob's").await;
    let note = common::create_note(&db, &alice, "Mine", "body", &[]).await;

    let patch = NotePatch {
        workspace_id: Some(Some(*bobs_ws.id)),
        ..Default::default()
    };
    let err = Note::update(*note.note.id, *alice.id, patch, &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundOrDenied));
}

#[tokio::test]
async fn list_paginates_newest_first() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let note = common::create_note(&db, &alice, &format!("Note {i}"), "body", &[]).await;
        ids.push(*note.note.id);
    }

    let (page1, total) = Note::list_for_owner(*alice.id, 1, 2, &db).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page1.len(), 2);
    assert_eq!(*page1[0].note.id, ids[4]);
    assert_eq!(*page1[1].note.id, ids[3]);

    let (page3, _) = Note::list_for_owner(*alice.id, 3, 2, &db).await.unwrap();
    assert_eq!(page3.len(), 1);
    assert_eq!(*page3[0].note.id, ids[0]);
}
