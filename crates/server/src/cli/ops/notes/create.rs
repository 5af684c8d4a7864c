use clap::Args;
use uuid::Uuid;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::notes::create::CreateNoteRequest;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Note title
    #[arg(long)]
    pub title: String,

    /// Note body
    #[arg(long)]
    pub content: String,

    /// Workspace to place the note in
    #[arg(long)]
    pub workspace_id: Option<Uuid>,

    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Note creation failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = NoteCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = CreateNoteRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            workspace_id: self.workspace_id,
            tags: self.tags.clone(),
        };

        let response = ctx.client.call(request).await?;
        let note = response
            .data
            .ok_or_else(|| NoteCreateError::Failed("empty response".to_string()))?;

        Ok(format!("Created note {}", note.id))
    }
}
