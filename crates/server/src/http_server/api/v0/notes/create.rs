use axum::extract::{Json, State};
use axum::response::IntoResponse;
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

/// Request to create a note, optionally inside a workspace and with an
/// initial set of tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub workspace_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub type CreateNoteResponse = ApiResponse<NoteInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, Error> {
    let note = Note::create(
        user.id,
        &req.title,
        &req.content,
        req.workspace_id,
        &req.tags,
        state.database(),
    )
    .await?;
    tracing::debug!(note_id = %note.note.id, "created note");

    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            NoteInfo::from(note),
            "Note created successfully",
        )),
    )
        .into_response())
}

impl ApiRequest for CreateNoteRequest {
    type Response = CreateNoteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/notes/").unwrap();
        client.post(full_url).json(&self)
    }
}
