use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::WorkspaceInfo;
use crate::database::models::Workspace;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to create a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub description: Option<String>,
}

pub type CreateWorkspaceResponse = ApiResponse<WorkspaceInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Json(req): Json<CreateWorkspaceRequest>,
) -> Result<impl IntoResponse, Error> {
    let workspace = Workspace::create(
        user.id,
        &req.name,
        req.description.as_deref(),
        state.database(),
    )
    .await?;

    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            WorkspaceInfo::from(workspace),
            "Workspace created successfully",
        )),
    )
        .into_response())
}

impl ApiRequest for CreateWorkspaceRequest {
    type Response = CreateWorkspaceResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/workspaces/").unwrap();
        client.post(full_url).json(&self)
    }
}
