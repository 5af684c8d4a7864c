use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::ShareGrant;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to revoke a grant. Owner-only; revoking an absent grant is a
/// no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeShareRequest {
    pub note_id: Uuid,
    pub user_id: Uuid,
}

pub type RevokeShareResponse = ApiResponse<()>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path((note_id, grantee_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, Error> {
    ShareGrant::revoke(note_id, user.id, grantee_id, state.database()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Share revoked successfully",
    )))
}

impl ApiRequest for RevokeShareRequest {
    type Response = RevokeShareResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/api/v0/shares/{}/{}",
                self.note_id, self.user_id
            ))
            .unwrap();
        client.delete(full_url)
    }
}
