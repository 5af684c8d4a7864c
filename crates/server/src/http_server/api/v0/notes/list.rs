use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::NoteInfo;
use crate::database::models::Note;
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::{PageQuery, PaginatedResponse};
use crate::ServiceState;

/// Request for a page of the requester's own notes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListNotesRequest {
    #[serde(flatten)]
    pub page: PageQuery,
}

pub type ListNotesResponse = PaginatedResponse<NoteInfo>;

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
    let query = query.validate()?;
    let (notes, total) =
        Note::list_for_owner(user.id, query.page, query.limit, state.database()).await?;

    Ok(Json(PaginatedResponse::ok(
        notes.into_iter().map(NoteInfo::from).collect(),
        query.page,
        query.limit,
        total,
    )))
}

impl ApiRequest for ListNotesRequest {
    type Response = ListNotesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/notes/").unwrap();
        client.get(full_url).query(&[
            ("page", self.page.page.to_string()),
            ("limit", self.page.limit.to_string()),
        ])
    }
}
