//! Tag attachment endpoints scoped to a single note.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NoteInfo;
use crate::database::models::{Note, Tag};
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::ApiResponse;
use crate::ServiceState;

/// Request to attach tags to a note; names are normalized and blank
/// entries skipped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachTagsRequest {
    #[serde(skip)]
    pub note_id: Uuid,
    pub tags: Vec<String>,
}

pub type AttachTagsResponse = ApiResponse<NoteInfo>;

pub async fn attach_handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<AttachTagsRequest>,
) -> Result<impl IntoResponse, Error> {
    if req.tags.iter().all(|t| t.trim().is_empty()) {
        return Err(Error::invalid("At least one tag name is required"));
    }

    let note = Note::attach_tags(id, user.id, &req.tags, state.database()).await?;
    Ok(Json(ApiResponse::ok(NoteInfo::from(note))))
}

/// Request to remove one tag from a note; a missing link is a no-op
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachTagRequest {
    pub note_id: Uuid,
    pub tag_name: String,
}

pub type DetachTagResponse = ApiResponse<()>;

pub async fn detach_handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Path((id, name)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, Error> {
    Tag::detach_from_note(id, user.id, &name, state.database()).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Tag removed from note",
    )))
}

impl ApiRequest for AttachTagsRequest {
    type Response = AttachTagsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!("/api/v0/notes/{}/tags", self.note_id))
            .unwrap();
        client.post(full_url).json(&self)
    }
}

impl ApiRequest for DetachTagRequest {
    type Response = DetachTagResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url
            .join(&format!(
                "/api/v0/notes/{}/tags/{}",
                self.note_id, self.tag_name
            ))
            .unwrap();
        client.delete(full_url)
    }
}
