use axum::routing::{delete, get};
use axum::Router;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod count;
pub mod create;
pub mod delete_tag;
pub mod list;

use crate::database::models::Tag;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:id", delete(delete_tag::handler))
        .route("/:id/count", get(count::handler))
        .with_state(state)
}

/// A tag in the requester's vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Tag> for TagInfo {
    fn from(t: Tag) -> Self {
        Self {
            id: *t.id,
            name: t.name,
            created_at: t.created_at,
        }
    }
}
