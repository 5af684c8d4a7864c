use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ShareInfo;
use crate::database::models::ShareGrant;
use crate::database::types::Permission;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to share a note with another user. Owner-only; re-sharing with
/// the same user overwrites the permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareNoteRequest {
    pub note_id: Uuid,
    pub user_id: Uuid,
    pub permission: Permission,
}

pub type ShareNoteResponse = ApiResponse<ShareInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Json(req): Json<ShareNoteRequest>,
) -> Result<impl IntoResponse, Error> {
    let grant = ShareGrant::share(
        req.note_id,
        user.id,
        req.user_id,
        req.permission,
        state.database(),
    )
    .await?;
    tracing::debug!(note_id = %req.note_id, grantee = %req.user_id, "shared note");

    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            ShareInfo::from(grant),
            "Note shared successfully",
        )),
    )
        .into_response())
}

impl ApiRequest for ShareNoteRequest {
    type Response = ShareNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/shares/").unwrap();
        client.post(full_url).json(&self)
    }
}
