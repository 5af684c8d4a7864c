use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::WorkspaceInfo;
use crate::database::models::Workspace;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for all of the requester's workspaces, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWorkspacesRequest;

pub type ListWorkspacesResponse = ApiResponse<Vec<WorkspaceInfo>>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let workspaces = Workspace::list_for_owner(user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(
        workspaces
            .into_iter()
            .map(WorkspaceInfo::from)
            .collect::<Vec<_>>(),
    )))
}

impl ApiRequest for ListWorkspacesRequest {
    type Response = ListWorkspacesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/workspaces/").unwrap();
        client.get(full_url)
    }
}
