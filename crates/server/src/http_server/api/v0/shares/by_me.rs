use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::SharedNoteInfo;
use crate::database::models::ShareGrant;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for grants the requester has handed out; the `username` on
/// each entry is the grantee's
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedByMeRequest;

pub type SharedByMeResponse = ApiResponse<Vec<SharedNoteInfo>>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let shares = ShareGrant::list_shared_by_me(user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(
        shares
            .into_iter()
            .map(SharedNoteInfo::from)
            .collect::<Vec<_>>(),
    )))
}

impl ApiRequest for SharedByMeRequest {
    type Response = SharedByMeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/shares/by-me").unwrap();
        client.get(full_url)
    }
}
