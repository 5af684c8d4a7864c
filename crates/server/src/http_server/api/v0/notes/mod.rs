use axum::routing::{delete, get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod create;
pub mod delete_note;
pub mod get;
pub mod list;
pub mod search;
pub mod tags;
pub mod update;

use crate::database::models::NoteWithTags;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler).get(list::handler))
        .route("/search", get(search::handler))
        .route(
            "/:id",
            get(get::handler)
                .patch(update::handler)
                .delete(delete_note::handler),
        )
        .route("/:id/tags", post(tags::attach_handler))
        .route("/:id/tags/:name", delete(tags::detach_handler))
        .with_state(state)
}

/// A note with its tag names, as returned by every note endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<NoteWithTags> for NoteInfo {
    fn from(n: NoteWithTags) -> Self {
        Self {
            id: *n.note.id,
            user_id: *n.note.user_id,
            workspace_id: n.note.workspace_id.map(|w| *w),
            title: n.note.title,
            content: n.note.content,
            tags: n.tags,
            created_at: n.note.created_at,
            updated_at: n.note.updated_at,
        }
    }
}
