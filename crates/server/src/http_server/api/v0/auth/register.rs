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

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub type RegisterResponse = ApiResponse<AuthData>;

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
    let (user, token) = auth::register(&req.email, &req.username, &req.password, state.database())
        .await?;
    tracing::info!(user_id = %user.id, "registered new account");

    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            AuthData {
                user: user.into(),
                token,
            },
            "User registered successfully",
        )),
    )
        .into_response())
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/auth/register").unwrap();
        client.post(full_url).json(&self)
    }
}
