use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::Note,
    repository::{NoteRepository, RepositoryError},
};

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Content is required")]
    MissingContent,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Note not found")]
    NotFound,

    #[error("store fault: {0}")]
    Store(#[from] RepositoryError),
}

/// Checks the title first, then the content, and returns both trimmed.
pub fn validate(
    title: Option<&str>,
    content: Option<&str>,
) -> Result<(String, String), ValidationError> {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingTitle)?;
    let content = content
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ValidationError::MissingContent)?;

    Ok((title.to_string(), content.to_string()))
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_notes(&self) -> Result<Vec<NoteResponse>, NoteServiceError> {
        let notes = self.repo.list().await?;
        Ok(notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        let (title, content) = validate(request.title.as_deref(), request.content.as_deref())?;

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            user_id: request.user_id,
            created_at: now,
            updated_at: now,
        };

        let note = self.repo.insert(note).await?;
        tracing::debug!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: &str,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        let (title, content) = validate(request.title.as_deref(), request.content.as_deref())?;

        self.repo
            .update(id, title, content, Utc::now())
            .await?
            .map(NoteResponse::from)
            .ok_or(NoteServiceError::NotFound)
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), NoteServiceError> {
        if self.repo.delete(id).await? {
            tracing::debug!("deleted note {}", id);
            Ok(())
        } else {
            Err(NoteServiceError::NotFound)
        }
    }
}
