use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Tag;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for the number of non-deleted notes carrying a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCountRequest {
    pub tag_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCountData {
    pub tag_id: Uuid,
    pub count: i64,
}

pub type TagCountResponse = ApiResponse<TagCountData>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let count = Tag::note_count(id, user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(TagCountData { tag_id: id, count })))
}

impl ApiRequest for TagCountRequest {
    type Response = TagCountResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/tags/{}/count", self.tag_id))
            .unwrap();
        client.get(full_url)
    }
}
