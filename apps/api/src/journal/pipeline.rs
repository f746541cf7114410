//! Journal save pipeline: `Saving -> Classifying -> Persisting`.
//!
//! Input is checked in `Saving` before any oracle call. Classification never fails
//! (the validator substitutes `Neutral`). A persistence failure fails the whole
//! operation; nothing is written and nothing is retried.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::session::Session;
use crate::classify::{check_sentiment_input, Classifier};
use crate::errors::AppError;
use crate::journal::derive_title;
use crate::journal::store::JournalStore;
use crate::models::journal::JournalEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Saving,
    Classifying,
    Persisting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Saving => "saving",
            Phase::Classifying => "classifying",
            Phase::Persisting => "persisting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JournalDraft {
    pub content: String,
    #[serde(default = "default_private")]
    pub is_private: bool,
}

fn default_private() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JournalPatch {
    pub content: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Clone)]
pub struct JournalPipeline {
    classifier: Classifier,
    store: Arc<dyn JournalStore>,
}

/// Logs the phase an operation failed in and passes the error through.
fn failed(phase: Phase, err: AppError) -> AppError {
    warn!(%phase, "Journal operation failed: {err}");
    err
}

impl JournalPipeline {
    pub fn new(classifier: Classifier, store: Arc<dyn JournalStore>) -> Self {
        Self { classifier, store }
    }

    pub async fn save(&self, session: &Session, draft: JournalDraft) -> Result<JournalEntry, AppError> {
        debug!(phase = %Phase::Saving, "Journal save started");
        check_sentiment_input(&draft.content).map_err(|e| failed(Phase::Saving, e))?;

        debug!(phase = %Phase::Classifying, "Classifying journal entry");
        let result = self
            .classifier
            .sentiment(&draft.content)
            .await
            .map_err(|e| failed(Phase::Classifying, e))?;

        debug!(phase = %Phase::Persisting, "Persisting journal entry");
        let now = Utc::now();
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            author_id: session.user_id().to_string(),
            title: derive_title(&draft.content),
            content: draft.content,
            emotion: Some(result.sentiment),
            is_private: draft.is_private,
            created_at: now,
            updated_at: now,
        };
        self.store
            .create(&entry)
            .await
            .map_err(|e| failed(Phase::Persisting, e.into()))?;

        info!(
            "Saved journal entry {} for user {} ({})",
            entry.id,
            entry.author_id,
            result.sentiment
        );
        Ok(entry)
    }

    /// Applies an edit. Content changes re-derive the title and re-classify;
    /// a privacy-only edit keeps the stored label.
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: JournalPatch,
    ) -> Result<JournalEntry, AppError> {
        let mut entry = self.owned_entry(session, id).await?;

        if let Some(content) = patch.content {
            if content != entry.content {
                check_sentiment_input(&content).map_err(|e| failed(Phase::Saving, e))?;
                let result = self
                    .classifier
                    .sentiment(&content)
                    .await
                    .map_err(|e| failed(Phase::Classifying, e))?;
                entry.title = derive_title(&content);
                entry.content = content;
                entry.emotion = Some(result.sentiment);
            }
        }
        if let Some(is_private) = patch.is_private {
            entry.is_private = is_private;
        }
        entry.updated_at = Utc::now();

        let found = self
            .store
            .update(&entry)
            .await
            .map_err(|e| failed(Phase::Persisting, e.into()))?;
        if !found {
            return Err(AppError::NotFound(format!("Journal entry {id} not found")));
        }
        Ok(entry)
    }

    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), AppError> {
        self.owned_entry(session, id).await?;
        self.store.delete(id).await?;
        info!("Deleted journal entry {id} for user {}", session.user_id());
        Ok(())
    }

    pub async fn get(&self, session: &Session, id: Uuid) -> Result<JournalEntry, AppError> {
        self.owned_entry(session, id).await
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<JournalEntry>, AppError> {
        Ok(self.store.list_by_author(session.user_id()).await?)
    }

    async fn owned_entry(&self, session: &Session, id: Uuid) -> Result<JournalEntry, AppError> {
        let entry = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {id} not found")))?;
        if entry.author_id != session.user_id() {
            return Err(AppError::Forbidden);
        }
        Ok(entry)
    }
}
