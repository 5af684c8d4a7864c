//! Shared test utilities for repository integration tests
#![allow(dead_code)]

use quill::database::models::{NoteWithTags, User};
use quill::database::models::{Note, Workspace};
use quill::database::Database;

/// Create an in-memory test database
pub async fn setup_test_db() -> Database {
    let db_url = url::Url::parse("sqlite::memory:").unwrap();
    Database::connect(&db_url).await.unwrap()
}

/// Register a user as `<name>@example.com` and return the account row.
pub async fn create_user(db: &Database, name: &str) -> User {
    let (user, _token) = quill::auth::register(&format!("{name}@example.com"), name, "password123", db)
        .await
        .unwrap();
    user
}

pub async fn create_note(
    db: &Database,
    owner: &User,
    title: &str,
    content: &str,
    tags: &[&str],
) -> NoteWithTags {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    Note::create(*owner.id, title, content, None, &tags, db)
        .await
        .unwrap()
}

pub async fn create_workspace(db: &Database, owner: &User, name: &str) -> Workspace {
    Workspace::create(*owner.id, name, None, db).await.unwrap()
}
