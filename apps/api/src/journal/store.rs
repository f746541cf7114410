use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::journal::{JournalEntry, JournalEntryRow};

#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn create(&self, entry: &JournalEntry) -> Result<(), sqlx::Error>;

    async fn get(&self, id: Uuid) -> Result<Option<JournalEntry>, sqlx::Error>;

    /// Overwrites title, content, emotion, privacy, and `updated_at`.
    /// Returns false if the entry no longer exists.
    async fn update(&self, entry: &JournalEntry) -> Result<bool, sqlx::Error>;

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    /// All entries by `author_id`, newest first.
    async fn list_by_author(&self, author_id: &str) -> Result<Vec<JournalEntry>, sqlx::Error>;
}

pub struct PgJournalStore {
    pool: PgPool,
}

impl PgJournalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JournalStore for PgJournalStore {
    async fn create(&self, entry: &JournalEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries
                (id, author_id, title, content, emotion, is_private, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.author_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.emotion.map(|e| e.as_str()))
        .bind(entry.is_private)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<JournalEntry>, sqlx::Error> {
        let row = sqlx::query_as::<_, JournalEntryRow>(
            "SELECT * FROM journal_entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(JournalEntry::from))
    }

    async fn update(&self, entry: &JournalEntry) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries SET
                title      = $2,
                content    = $3,
                emotion    = $4,
                is_private = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(entry.id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.emotion.map(|e| e.as_str()))
        .bind(entry.is_private)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, JournalEntryRow>(
            r#"
            SELECT * FROM journal_entries
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(JournalEntry::from).collect())
    }
}
