use clap::{Args, Subcommand};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (List, list::List),
    (Get, get::Get),
    (Search, search::Search),
    (Delete, delete::Delete),
}

pub type NotesCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Notes {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[async_trait::async_trait]
impl Op for Notes {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// One-line rendering shared by the list and search outputs.
pub(crate) fn summarize(note: &quill::http_server::api::v0::notes::NoteInfo) -> String {
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", note.tags.join(", "))
    };
    format!("{}  {}{}", note.id, note.title, tags)
}
