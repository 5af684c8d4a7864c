use clap::Args;
use uuid::Uuid;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::notes::get::GetNoteRequest;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Note id
    pub note_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteGetError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Note lookup failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = NoteGetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = GetNoteRequest {
            note_id: self.note_id,
        };

        let response = ctx.client.call(request).await?;
        let note = response
            .data
            .ok_or_else(|| NoteGetError::Failed("empty response".to_string()))?;

        let mut lines = vec![format!("# {}", note.title)];
        if !note.tags.is_empty() {
            lines.push(format!("tags: {}", note.tags.join(", ")));
        }
        if let Some(ws) = note.workspace_id {
            lines.push(format!("workspace: {}", ws));
        }
        lines.push(String::new());
        lines.push(note.content);
        Ok(lines.join("\n"))
    }
}
