use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::UserInfo;
use crate::database::models::User;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for the authenticated account's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeRequest;

pub type MeResponse = ApiResponse<UserInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let user = User::get(user.id, state.database())
        .await?
        .ok_or(Error::Unauthenticated)?;
    Ok(Json(ApiResponse::ok(UserInfo::from(user))))
}

impl ApiRequest for MeRequest {
    type Response = MeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/auth/me").unwrap();
        client.get(full_url)
    }
}
