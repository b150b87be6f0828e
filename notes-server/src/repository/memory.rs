use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{NoteRepository, RepositoryError};
use crate::models::Note;

/// Process-local note store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryRepository {
    notes: RwLock<Vec<Note>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn insert(&self, note: Note) -> Result<Note, RepositoryError> {
        let mut notes = self.notes.write().await;

        if notes.iter().any(|existing| existing.id == note.id) {
            return Err(RepositoryError::Backend(format!(
                "duplicate note id {}",
                note.id
            )));
        }

        notes.push(note.clone());
        Ok(note)
    }

    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut notes = self.notes.write().await;

        Ok(notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = title;
            note.content = content;
            note.updated_at = updated_at;
            note.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| note.id != id);

        Ok(notes.len() < before)
    }

    async fn list(&self) -> Result<Vec<Note>, RepositoryError> {
        Ok(self.notes.read().await.clone())
    }
}
