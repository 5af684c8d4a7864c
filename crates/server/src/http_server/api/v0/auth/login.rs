use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::AuthData;
use crate::auth;
use crate::error::Error;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to exchange credentials for a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub type LoginResponse = ApiResponse<AuthData>;

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, token) = auth::login(&req.email, &req.password, state.database()).await?;
    tracing::debug!(user_id = %user.id, "login succeeded");

    Ok(Json(ApiResponse::ok(AuthData {
        user: user.into(),
        token,
    })))
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/auth/login").unwrap();
        client.post(full_url).json(&self)
    }
}
