//! Integration tests for note sharing

mod common;

use quill::database::models::{Note, NotePatch, ShareGrant};
use quill::database::types::Permission;
use quill::Error;

#[tokio::test]
async fn resharing_overwrites_the_grant_in_place() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();
    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Edit, &db)
        .await
        .unwrap();

    let grants = ShareGrant::list_for_note(*note.note.id, *alice.id, &db)
        .await
        .unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].permission, Permission::Edit);
}

#[tokio::test]
async fn self_share_is_rejected() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    let err = ShareGrant::share(*note.note.id, *alice.id, *alice.id, Permission::Read, &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn only_the_owner_can_share() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let carol = common::create_user(&db, "carol").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Edit, &db)
        .await
        .unwrap();

    // An edit grant does not confer the right to re-share.
    let err = ShareGrant::share(*note.note.id, *bob.id, *carol.id, Permission::Read, &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundOrDenied));
}

#[tokio::test]
async fn shared_lists_carry_the_counterpart_username() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();

    let with_bob = ShareGrant::list_shared_with_me(*bob.id, &db).await.unwrap();
    assert_eq!(with_bob.len(), 1);
    assert_eq!(with_bob[0].counterpart_username, "alice");
    assert_eq!(with_bob[0].note_title, "Draft");

    let by_alice = ShareGrant::list_shared_by_me(*alice.id, &db).await.unwrap();
    assert_eq!(by_alice.len(), 1);
    assert_eq!(by_alice[0].counterpart_username, "bob");
}

#[tokio::test]
async fn revoke_removes_access_and_is_idempotent() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();
    assert!(Note::get_with_tags(*note.note.id, *bob.id, &db).await.is_ok());

    ShareGrant::revoke(*note.note.id, *alice.id, *bob.id, &db)
        .await
        .unwrap();
    let err = Note::get_with_tags(*note.note.id, *bob.id, &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundOrDenied));

    // Revoking again is a no-op.
    ShareGrant::revoke(*note.note.id, *alice.id, *bob.id, &db)
        .await
        .unwrap();
}

#[tokio::test]
async fn share_lifecycle_read_to_edit_to_deleted() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;

    let note = common::create_note(&db, &alice, "Draft", "hello", &["work"]).await;
    let note_id = *note.note.id;

    ShareGrant::share(note_id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();

    // Bob can read but not write.
    let seen = Note::get_with_tags(note_id, *bob.id, &db).await.unwrap();
    assert_eq!(seen.note.title, "Draft");
    assert_eq!(seen.tags, vec!["work".to_string()]);

    let patch = NotePatch {
        content: Some("bob was here".to_string()),
        ..Default::default()
    };
    let err = Note::update(note_id, *bob.id, patch.clone(), &db)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFoundOrDenied));

    // Upgrade to edit; Bob's write now lands and bumps updated_at.
    ShareGrant::share(note_id, *alice.id, *bob.id, Permission::Edit, &db)
        .await
        .unwrap();
    let before = seen.note.updated_at;
    let updated = Note::update(note_id, *bob.id, patch, &db).await.unwrap();
    assert_eq!(updated.note.content, "bob was here");
    assert!(updated.note.updated_at > before);

    // The owner deletes; the note vanishes for everyone.
    Note::soft_delete(note_id, *alice.id, &db).await.unwrap();
    assert!(matches!(
        Note::get_with_tags(note_id, *alice.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
    assert!(matches!(
        Note::get_with_tags(note_id, *bob.id, &db).await.unwrap_err(),
        Error::NotFoundOrDenied
    ));
}

#[tokio::test]
async fn soft_deleted_notes_drop_out_of_shared_lists() {
    let db = common::setup_test_db().await;
    let alice = common::create_user(&db, "alice").await;
    let bob = common::create_user(&db, "bob").await;
    let note = common::create_note(&db, &alice, "Draft", "hello", &[]).await;

    ShareGrant::share(*note.note.id, *alice.id, *bob.id, Permission::Read, &db)
        .await
        .unwrap();
    Note::soft_delete(*note.note.id, *alice.id, &db).await.unwrap();

    assert!(ShareGrant::list_shared_with_me(*bob.id, &db)
        .await
        .unwrap()
        .is_empty());
    assert!(ShareGrant::list_shared_by_me(*alice.id, &db)
        .await
        .unwrap()
        .is_empty());
}
