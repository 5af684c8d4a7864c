use clap::Args;
use uuid::Uuid;

use quill::http_server::api::client::ApiError;
use quill::http_server::api::v0::notes::delete_note::DeleteNoteRequest;

#[derive(Args, Debug, Clone)]
pub struct Delete {
    /// Note id
    pub note_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteDeleteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = NoteDeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = DeleteNoteRequest {
            note_id: self.note_id,
        };

        ctx.client.call(request).await?;
        Ok(format!("Deleted note {}", self.note_id))
    }
}
