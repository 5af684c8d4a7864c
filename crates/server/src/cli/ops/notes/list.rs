use clap::Args;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::envelope::PageQuery;
use quill::http_server::api::v0::notes::list::ListNotesRequest;

#[derive(Args, Debug, Clone)]
pub struct List {
    /// Page number (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Notes per page
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteListError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for List {
    type Error = NoteListError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = ListNotesRequest {
            page: PageQuery {
                page: self.page,
                limit: self.limit,
            },
        };

        let response = ctx.client.call(request).await?;

        if response.data.is_empty() {
            return Ok("No notes found".to_string());
        }

        let mut lines: Vec<String> = response.data.iter().map(super::summarize).collect();
        lines.push(format!(
            "page {}/{} ({} total)",
            response.pagination.page, response.pagination.total_pages, response.pagination.total
        ));
        Ok(lines.join("\n"))
    }
}
