use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A submitted Q&A question. `text` is always the moderated (rephrased) text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: Uuid,
    pub author_id: String,
    pub is_anonymous: bool,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
