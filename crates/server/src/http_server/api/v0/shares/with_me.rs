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

/// Request for notes other users have shared with the requester; the
/// `username` on each entry is the granter's
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedWithMeRequest;

pub type SharedWithMeResponse = ApiResponse<Vec<SharedNoteInfo>>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let shares = ShareGrant::list_shared_with_me(user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(
        shares
            .into_iter()
            .map(SharedNoteInfo::from)
            .collect::<Vec<_>>(),
    )))
}

impl ApiRequest for SharedWithMeRequest {
    type Response = SharedWithMeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/shares/with-me").unwrap();
        client.get(full_url)
    }
}
