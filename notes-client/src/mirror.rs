use crate::{
    api::{ApiError, Note, NoteDraft, NotesApi},
    render::{View, render},
};

/// Local, non-authoritative copy of the server's note list.
///
/// The mirror only changes after the server confirms a mutation, so it never
/// disagrees with itself; it can still lag behind other clients.
#[derive(Debug)]
pub struct NoteMirror {
    api: NotesApi,
    notes: Vec<Note>,
    editing: Option<String>,
}

impl NoteMirror {
    pub const fn new(api: NotesApi) -> Self {
        Self {
            api,
            notes: Vec::new(),
            editing: None,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Id of the note open in the editor, `None` when adding a new note.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Replaces the mirror with the server's list. Any failure leaves an empty
    /// mirror.
    pub async fn load(&mut self) {
        self.notes = match self.api.list().await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::error!("Failed to load notes: {e}");
                Vec::new()
            }
        };
    }

    /// Opens the editor for `id`, or for a new note when `id` is `None`, and
    /// returns its initial contents. An id missing from the mirror opens a
    /// blank new-note editor.
    pub fn open_editor(&mut self, id: Option<&str>) -> NoteDraft {
        match id.and_then(|id| self.notes.iter().find(|note| note.id == id)) {
            Some(note) => {
                self.editing = Some(note.id.clone());
                NoteDraft::new(note.title.clone(), note.content.clone())
            }
            None => {
                self.editing = None;
                NoteDraft::default()
            }
        }
    }

    pub fn close_editor(&mut self) {
        self.editing = None;
    }

    /// Updates the note being edited, or creates a new one at the front of the
    /// list. An update only replaces the entry with the same id, if the mirror
    /// still holds one. The editor stays open and the mirror untouched on
    /// failure.
    pub async fn save(&mut self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let draft = draft.trimmed();

        let saved = if let Some(id) = self.editing.clone() {
            let updated = self.api.update(&id, &draft).await.inspect_err(|e| {
                tracing::error!("Failed to update note: {e}");
            })?;

            if let Some(entry) = self.notes.iter_mut().find(|note| note.id == id) {
                *entry = updated.clone();
            }
            updated
        } else {
            let created = self.api.create(&draft).await.inspect_err(|e| {
                tracing::error!("Failed to create note: {e}");
            })?;

            self.notes.insert(0, created.clone());
            created
        };

        self.editing = None;
        Ok(saved)
    }

    /// Deletes the note and drops it from the mirror once the server confirms.
    pub async fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        self.api.delete(id).await.inspect_err(|e| {
            tracing::error!("Failed to delete note: {e}");
        })?;

        self.notes.retain(|note| note.id != id);
        Ok(())
    }

    /// Asks `confirm` about the note first. Returns whether a delete was
    /// issued and succeeded.
    pub async fn confirm_delete(&mut self, id: &str, confirm: impl FnOnce(&Note) -> bool) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };

        confirm(note) && self.delete(id).await.is_ok()
    }

    pub fn view(&self) -> View {
        render(&self.notes)
    }
}
