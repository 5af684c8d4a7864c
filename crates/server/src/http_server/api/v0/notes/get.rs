use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NoteInfo;
use crate::database::models::Note;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to fetch a note by id; the requester must own the note or hold
/// a share grant on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNoteRequest {
    pub note_id: Uuid,
}

pub type GetNoteResponse = ApiResponse<NoteInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let note = Note::get_with_tags(id, user.id, state.database()).await?;
    Ok(Json(ApiResponse::ok(NoteInfo::from(note))))
}

impl ApiRequest for GetNoteRequest {
    type Response = GetNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/notes/{}", self.note_id))
            .unwrap();
        client.get(full_url)
    }
}
