use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod count;
pub mod create;
pub mod delete_workspace;
pub mod get;
pub mod list;
pub mod update;

use crate::database::models::Workspace;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:id",
            get(get::handler)
                .patch(update::handler)
                .delete(delete_workspace::handler),
        )
        .route("/:id/count", get(count::handler))
        .with_state(state)
}

/// A workspace owned by the requester. Workspaces are never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Workspace> for WorkspaceInfo {
    fn from(w: Workspace) -> Self {
        Self {
            id: *w.id,
            name: w.name,
            description: w.description,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}
