use axum::extract::{Json, State};
use axum::response::IntoResponse;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::TagInfo;
use crate::database::models::Tag;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to create a tag in the requester's vocabulary. Idempotent:
/// creating an existing name returns the existing tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

pub type CreateTagResponse = ApiResponse<TagInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<impl IntoResponse, Error> {
    let tag = Tag::get_or_create(user.id, &req.name, state.database()).await?;

    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::ok(TagInfo::from(tag))),
    )
        .into_response())
}

impl ApiRequest for CreateTagRequest {
    type Response = CreateTagResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/tags/").unwrap();
        client.post(full_url).json(&self)
    }
}
