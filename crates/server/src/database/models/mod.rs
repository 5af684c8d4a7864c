mod note;
mod share;
mod tag;
mod user;
mod workspace;

pub use note::{Note, NoteWithTags, NotePatch, SearchFilters};
pub use share::{ShareGrant, SharedNoteDetails};
pub use tag::Tag;
pub use user::User;
pub use workspace::{Workspace, WorkspacePatch};
