use clap::Args;
use uuid::Uuid;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::notes::search::SearchNotesRequest;

#[derive(Args, Debug, Clone)]
pub struct Search {
    /// Full-text query over titles and content
    #[arg(long)]
    pub query: Option<String>,

    /// Restrict to one workspace
    #[arg(long)]
    pub workspace_id: Option<Uuid>,

    /// Only notes created at or after this RFC 3339 timestamp
    #[arg(long)]
    pub start_date: Option<String>,

    /// Only notes created at or before this RFC 3339 timestamp
    #[arg(long)]
    pub end_date: Option<String>,

    /// Comma-separated tags the note must carry in full
    #[arg(long)]
    pub tags: Option<String>,

    /// Page number (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Notes per page
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteSearchError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Search {
    type Error = NoteSearchError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = SearchNotesRequest {
            query: self.query.clone(),
            workspace_id: self.workspace_id,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            tags: self.tags.clone(),
            page: Some(self.page),
            limit: Some(self.limit),
        };

        let response = ctx.client.call(request).await?;

        if response.data.is_empty() {
            return Ok("No notes matched".to_string());
        }

        let mut lines: Vec<String> = response.data.iter().map(super::summarize).collect();
        lines.push(format!(
            "page {}/{} ({} total)",
            response.pagination.page, response.pagination.total_pages, response.pagination.total
        ));
        Ok(lines.join("\n"))
    }
}
