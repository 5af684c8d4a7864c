//! Integration tests for the workspace repository

mod common;

use quill::database::models::{Note, NotePatch, Workspace, WorkspacePatch};
use quill::Error;

#[tokio::test]
async fn workspaces_are_owner_scoped() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    assert!(Workspace::get(*ws.id, *alice.id, &db).await.unwrap().is_some());
    assert!(Workspace::get(*ws.id, *bob.id, &db).await.unwrap().is_none());
}

#[tokio::test]
async fn update_applies_patch_fields_independently() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let ws = Workspace::create(*alice.id, "Research", Some("papers"), &db)
        .await
        .unwrap();

    let patch = WorkspacePatch {
        name: Some("Archive".to_string()),
        description: None,
    };
    let updated = Workspace::update(*ws.id, *alice.id, patch, &db).await.unwrap();
    assert_eq!(updated.name, "Archive");
    assert_eq!(updated.description.as_deref(), Some("papers"));

    // Explicit null clears the description.
    let patch = WorkspacePatch {
        name: None,
        description: Some(None),
    };
    let updated = Workspace::update(*ws.id, *alice.id, patch, &db).await.unwrap();
    assert_eq!(updated.description, None);

    // Empty patch returns the row unchanged.
    let unchanged = Workspace::update(*ws.id, *alice.id, WorkspacePatch::default(), &db)
        .await
        .unwrap();
    assert_eq!(unchanged.updated_at, updated.updated_at);
}

#[tokio::test]
async fn delete_blocks_while_live_notes_remain() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    let note = Note::create(*alice.id, "Paper", "draft", Some(*ws.id), &[], &db)
        .await
        .unwrap();

    let err = Workspace::delete(*ws.id, *alice.id, &db).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert!(Workspace::get(*ws.id, *alice.id, &db).await.unwrap().is_some());

    // Moving the note out unblocks deletion.
    let patch = NotePatch {
        workspace_id: Some(None),
        ..Default::default()
    };
    Note::update(*note.note.id, *alice.id, patch, &db).await.unwrap();

    Workspace::delete(*ws.id, *alice.id, &db).await.unwrap();
    assert!(Workspace::get(*ws.id, *alice.id, &db).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_ignores_soft_deleted_notes() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    let note = Note::create(*alice.id, "Paper", "draft", Some(*ws.id), &[], &db)
        .await
        .unwrap();
    Note::soft_delete(*note.note.id, *alice.id, &db).await.unwrap();

    // Only a soft-deleted note references the workspace; deletion proceeds
    // and the stale reference is cleared.
    Workspace::delete(*ws.id, *alice.id, &db).await.unwrap();
    assert!(Workspace::get(*ws.id, *alice.id, &db).await.unwrap().is_none());
}

#[tokio::test]
async fn note_count_excludes_soft_deleted() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    let a = Note::create(*alice.id, "A", "body", Some(*ws.id), &[], &db)
        .await
        .unwrap();
    Note::create(*alice.id, "B", "body", Some(*ws.id), &[], &db)
        .await
        .unwrap();

    assert_eq!(Workspace::note_count(*ws.id, *alice.id, &db).await.unwrap(), 2);

    Note::soft_delete(*a.note.id, *alice.id, &db).await.unwrap();
    assert_eq!(Workspace::note_count(*ws.id, *alice.id, &db).await.unwrap(), 1);
}

#[tokio::test]
async fn only_the_owner_can_delete() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let ws = common::create_workspace(&db, &alice, "Research").await;

    assert!(matches!(
        Workspace::delete(*ws.id, *bob.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
}
