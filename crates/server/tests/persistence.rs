//! File-backed database lifecycle: data survives a pool restart

mod common;

use quill::database::models::{Note, User};
use quill::database::Database;

#[tokio::test]
async fn file_backed_database_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let db_url =
        url::Url::parse(&format!("sqlite://{}/quill.db", dir.path().display())).unwrap();

    let db = Database::connect(&db_url).await.unwrap();
    let alice = common::create_user(&db, "alice").await;
    let note = common::create_note(&db, &alice, "Persisted", "survives restarts", &["work"]).await;
    db.close().await;

    // Reconnecting runs migrations again; they must be idempotent and the
    // rows must still be there.
    let db = Database::connect(&db_url).await.unwrap();
    let reloaded = User::get(*alice.id, &db).await.unwrap().unwrap();
    assert_eq!(reloaded.email, "alice@example.com");

    let (notes, total) = Note::list_for_owner(*alice.id, 1, 20, &db).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(*notes[0].note.id, *note.note.id);
    assert_eq!(notes[0].tags, vec!["work".to_string()]);
}
