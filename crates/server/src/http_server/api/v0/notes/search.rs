use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use super::NoteInfo;
use crate::database::models::{Note, SearchFilters};
use crate::error::Error;
use crate::http_server::api::auth_user::AuthUser;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::envelope::{PageQuery, PaginatedResponse};
use crate::ServiceState;

/// Search parameters; all present filters AND-compose. Dates are RFC 3339
/// and `tags` is a comma-separated list the note must carry in full.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchNotesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

pub type SearchNotesResponse = PaginatedResponse<NoteInfo>;

fn parse_date(raw: &str, field: &str) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|_| Error::invalid(format!("{field} must be an RFC 3339 timestamp")))
}

impl SearchNotesRequest {
    fn into_filters(self) -> Result<(SearchFilters, PageQuery), Error> {
        let defaults = PageQuery::default();
        let page = PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        };
        let filters = SearchFilters {
            query: self.query.filter(|q| !q.trim().is_empty()),
            workspace_id: self.workspace_id,
            start_date: self
                .start_date
                .as_deref()
                .map(|d| parse_date(d, "start_date"))
                .transpose()?,
            end_date: self
                .end_date
                .as_deref()
                .map(|d| parse_date(d, "end_date"))
                .transpose()?,
            tags: self
                .tags
                .as_deref()
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };
        Ok((filters, page))
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    user: AuthUser,
    Query(req): Query<SearchNotesRequest>,
) -> Result<impl IntoResponse, Error> {
    let (filters, page) = req.into_filters()?;
    let page = page.validate()?;

    let (notes, total) =
        Note::search(user.id, &filters, page.page, page.limit, state.database()).await?;

    Ok(Json(PaginatedResponse::ok(
        notes.into_iter().map(NoteInfo::from).collect(),
        page.page,
        page.limit,
        total,
    )))
}

impl ApiRequest for SearchNotesRequest {
    type Response = SearchNotesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/notes/search").unwrap();
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(p) = self.page {
            params.push(("page", p.to_string()));
        }
        if let Some(l) = self.limit {
            params.push(("limit", l.to_string()));
        }
        if let Some(q) = &self.query {
            params.push(("query", q.clone()));
        }
        if let Some(ws) = &self.workspace_id {
            params.push(("workspace_id", ws.to_string()));
        }
        if let Some(d) = &self.start_date {
            params.push(("start_date", d.clone()));
        }
        if let Some(d) = &self.end_date {
            params.push(("end_date", d.clone()));
        }
        if let Some(t) = &self.tags {
            params.push(("tags", t.clone()));
        }
        client.get(full_url).query(&params)
    }
}
