mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    /// Fault raised by a backend that is not Postgres.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistent note collection.
///
/// A note exists exactly when a record with its id is present. Writes for the
/// same id race freely; the last one to commit wins.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, note: Note) -> Result<Note, RepositoryError>;

    /// Overwrites title and content. `None` when no note has this id.
    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError>;

    /// `false` when no note has this id.
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;

    async fn list(&self) -> Result<Vec<Note>, RepositoryError>;
}
