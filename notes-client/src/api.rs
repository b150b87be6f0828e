use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Title and content as typed into the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(self.title.trim(), self.content.trim())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// Thin typed wrapper over the notes JSON API.
#[derive(Debug, Clone)]
pub struct NotesApi {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApi {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.client.get(&self.base_url).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let response = self.client.post(&self.base_url).json(draft).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update(&self, id: &str, draft: &NoteDraft) -> Result<Note, ApiError> {
        let response = self.client.put(self.note_url(id)).json(draft).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Turns any non-success status into `ApiError::Status`, keeping the server's
/// message when the body carries one.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(ApiError::Status { status, message })
}
