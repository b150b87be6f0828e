use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteRepository, RepositoryError, embedded::migrations};
use crate::models::Note;

const NOTE_COLUMNS: &str = "id, title, content, user_id, created_at, updated_at";

pub struct PgRepository {
    client: Client,
}

impl PgRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, RepositoryError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), RepositoryError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for PgRepository {
    async fn insert(&self, note: Note) -> Result<Note, RepositoryError> {
        let row = self
            .client
            .query_one(
                format!(
                    "INSERT INTO notes ({NOTE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
                     RETURNING {NOTE_COLUMNS}"
                )
                .as_str(),
                &[
                    &note.id,
                    &note.title,
                    &note.content,
                    &note.user_id,
                    &note.created_at,
                    &note.updated_at,
                ],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError> {
        let row = self
            .client
            .query_opt(
                format!(
                    "UPDATE notes SET title = $1, content = $2, updated_at = $3 WHERE id = $4 \
                     RETURNING {NOTE_COLUMNS}"
                )
                .as_str(),
                &[&title, &content, &updated_at, &id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    async fn list(&self) -> Result<Vec<Note>, RepositoryError> {
        let rows = self
            .client
            .query(
                format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at, id").as_str(),
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }
}
