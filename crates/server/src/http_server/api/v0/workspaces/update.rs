use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkspaceInfo;
use crate::database::models::{Workspace, WorkspacePatch};
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Patch body for a workspace. An absent `description` is untouched; an
/// explicit null clears it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WorkspacePatchBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl From<WorkspacePatchBody> for WorkspacePatch {
    fn from(b: WorkspacePatchBody) -> Self {
        Self {
            name: b.name,
            description: b.description,
        }
    }
}

/// Request to patch one of the requester's workspaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    #[serde(skip)]
    pub workspace_id: Uuid,
    #[serde(flatten)]
    pub patch: WorkspacePatchBody,
}

pub type UpdateWorkspaceResponse = ApiResponse<WorkspaceInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<WorkspacePatchBody>,
) -> Result<impl IntoResponse, Error> {
    let workspace = Workspace::update(id, user.id, body.into(), state.database()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        WorkspaceInfo::from(workspace),
        "Workspace updated successfully",
    )))
}

impl ApiRequest for UpdateWorkspaceRequest {
    type Response = UpdateWorkspaceResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/workspaces/{}", self.workspace_id))
            .unwrap();
        client.patch(full_url).json(&self.patch)
    }
}
