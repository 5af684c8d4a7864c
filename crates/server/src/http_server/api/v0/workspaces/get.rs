use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkspaceInfo;
use crate::database::models::Workspace;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to fetch one of the requester's workspaces by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWorkspaceRequest {
    pub workspace_id: Uuid,
}

pub type GetWorkspaceResponse = ApiResponse<WorkspaceInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let workspace = Workspace::get(id, user.id, state.database())
        .await?
        .ok_or(Error::NotFoundOrDenied)?;

    Ok(Json(ApiResponse::ok(WorkspaceInfo::from(workspace))))
}

impl ApiRequest for GetWorkspaceRequest {
    type Response = GetWorkspaceResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/workspaces/{}", self.workspace_id))
            .unwrap();
        client.get(full_url)
    }
}
