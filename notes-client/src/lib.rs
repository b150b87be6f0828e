pub mod api;
pub mod mirror;
pub mod render;

pub use api::{ApiError, Note, NoteDraft, NotesApi};
pub use mirror::NoteMirror;
pub use render::{NoteCard, View, render};
