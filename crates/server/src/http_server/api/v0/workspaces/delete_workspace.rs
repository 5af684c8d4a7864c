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

/// Request to delete an empty workspace. Deleting one that still holds
/// live notes is a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteWorkspaceRequest {
    pub workspace_id: Uuid,
}

pub type DeleteWorkspaceResponse = ApiResponse<()>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    Workspace::delete(id, user.id, state.database()).await?;
    tracing::debug!(workspace_id = %id, "deleted workspace");

    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Workspace deleted successfully",
    )))
}

impl ApiRequest for DeleteWorkspaceRequest {
    type Response = DeleteWorkspaceResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/workspaces/{}", self.workspace_id))
            .unwrap();
        client.delete(full_url)
    }
}
