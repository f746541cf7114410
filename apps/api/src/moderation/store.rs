use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::question::QuestionRow;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn create(&self, question: &QuestionRow) -> Result<(), sqlx::Error>;

    /// Most recent questions first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<QuestionRow>, sqlx::Error>;
}

pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn create(&self, question: &QuestionRow) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO questions (id, author_id, is_anonymous, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(question.id)
        .bind(&question.author_id)
        .bind(question.is_anonymous)
        .bind(&question.text)
        .bind(question.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<QuestionRow>, sqlx::Error> {
        sqlx::query_as::<_, QuestionRow>(
            "SELECT * FROM questions ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
