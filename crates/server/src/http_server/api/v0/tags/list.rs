use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::TagInfo;
use crate::database::models::Tag;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for the requester's full tag vocabulary, name-ordered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTagsRequest;

pub type ListTagsResponse = ApiResponse<Vec<TagInfo>>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let tags = Tag::list_for_owner(user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(
        tags.into_iter().map(TagInfo::from).collect::<Vec<_>>(),
    )))
}

impl ApiRequest for ListTagsRequest {
    type Response = ListTagsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/tags/").unwrap();
        client.get(full_url)
    }
}
