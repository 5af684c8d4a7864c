use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NoteInfo;
use crate::database::models::{Note, NotePatch};
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to patch a note. Absent fields are untouched; `workspace_id`
/// set to null detaches the note from its workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(skip)]
    pub note_id: Uuid,
    #[serde(flatten)]
    pub patch: NotePatch,
}

pub type UpdateNoteResponse = ApiResponse<NoteInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<NotePatch>,
) -> Result<impl IntoResponse, Error> {
    let note = Note::update(id, user.id, patch, state.database()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        NoteInfo::from(note),
        "Note updated successfully",
    )))
}

impl ApiRequest for UpdateNoteRequest {
    type Response = UpdateNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/notes/{}", self.note_id))
            .unwrap();
        client.patch(full_url).json(&self.patch)
    }
}
