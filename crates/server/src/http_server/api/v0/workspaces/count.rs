use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Workspace;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for the number of non-deleted notes in a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceCountRequest {
    pub workspace_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceCountData {
    pub workspace_id: Uuid,
    pub count: i64,
}

pub type WorkspaceCountResponse = ApiResponse<WorkspaceCountData>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let count = Workspace::note_count(id, user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(WorkspaceCountData {
        workspace_id: id,
        count,
    })))
}

impl ApiRequest for WorkspaceCountRequest {
    type Response = WorkspaceCountResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/workspaces/{}/count", self.workspace_id))
            .unwrap();
        client.get(full_url)
    }
}
