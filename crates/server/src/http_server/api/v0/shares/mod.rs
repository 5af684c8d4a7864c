use axum::routing::{delete, get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod by_me;
pub mod for_note;
pub mod revoke;
pub mod share;
pub mod with_me;

use crate::database::models::{ShareGrant, SharedNoteDetails};
use crate::database::types::Permission;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(share::handler))
        .route("/:note_id/:user_id", delete(revoke::handler))
        .route("/with-me", get(with_me::handler))
        .route("/by-me", get(by_me::handler))
        .route("/note/:id", get(for_note::handler))
        .with_state(state)
}

/// A bare share grant as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareInfo {
    pub id: Uuid,
    pub note_id: Uuid,
    pub shared_with_user_id: Uuid,
    pub shared_by_user_id: Uuid,
    pub permission: Permission,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ShareGrant> for ShareInfo {
    fn from(g: ShareGrant) -> Self {
        Self {
            id: *g.id,
            note_id: *g.note_id,
            shared_with_user_id: *g.shared_with_user_id,
            shared_by_user_id: *g.shared_by_user_id,
            permission: g.permission,
            created_at: g.created_at,
        }
    }
}

/// A grant joined with the note's content and the username on the other
/// side of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedNoteInfo {
    pub id: Uuid,
    pub note_id: Uuid,
    pub shared_with_user_id: Uuid,
    pub shared_by_user_id: Uuid,
    pub permission: Permission,
    pub note_title: String,
    pub note_content: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<SharedNoteDetails> for SharedNoteInfo {
    fn from(d: SharedNoteDetails) -> Self {
        Self {
            id: *d.id,
            note_id: *d.note_id,
            shared_with_user_id: *d.shared_with_user_id,
            shared_by_user_id: *d.shared_by_user_id,
            permission: d.permission,
            note_title: d.note_title,
            note_content: d.note_content,
            username: d.counterpart_username,
            created_at: d.created_at,
        }
    }
}
