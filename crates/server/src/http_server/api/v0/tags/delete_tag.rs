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

/// Request to delete a tag from the requester's vocabulary; note links go
/// with it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTagRequest {
    pub tag_id: Uuid,
}

pub type DeleteTagResponse = ApiResponse<()>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    Tag::delete(id, user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Tag deleted successfully",
    )))
}

impl ApiRequest for DeleteTagRequest {
    type Response = DeleteTagResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/tags/{}", self.tag_id))
            .unwrap();
        client.delete(full_url)
    }
}
