use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Note;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to soft-delete a note. Owner-only; share holders cannot delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNoteRequest {
    pub note_id: Uuid,
}

pub type DeleteNoteResponse = ApiResponse<()>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    Note::soft_delete(id, user.id, state.database()).await?;
    tracing::debug!(note_id = %id, "soft-deleted note");

    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Note deleted successfully",
    )))
}

impl ApiRequest for DeleteNoteRequest {
    type Response = DeleteNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/notes/{}", self.note_id))
            .unwrap();
        client.delete(full_url)
    }
}
