use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SharedNoteInfo;
use crate::database::models::ShareGrant;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request for every grant on one note. Owner-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharesForNoteRequest {
    pub note_id: Uuid,
}

pub type SharesForNoteResponse = ApiResponse<Vec<SharedNoteInfo>>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let shares = ShareGrant::list_for_note(id, user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(
        shares
            .into_iter()
            .map(SharedNoteInfo::from)
            .collect::<Vec<_>>(),
    )))
}

impl ApiRequest for SharesForNoteRequest {
    type Response = SharesForNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/shares/note/{}", self.note_id))
            .unwrap();
        client.get(full_url)
    }
}
