use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::profile::{Profile, ProfilePatch};
use crate::profiles::settings::UserSettings;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Profile>, sqlx::Error>;

    /// Inserts the profile; an existing profile with the same id is left untouched.
    async fn create(&self, profile: &Profile) -> Result<(), sqlx::Error>;

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Option<Profile>, sqlx::Error>;

    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, sqlx::Error>;

    async fn put_settings(&self, user_id: &str, settings: &UserSettings) -> Result<(), sqlx::Error>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, id: &str) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, profile: &Profile) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO profiles
                (id, email, username, full_name, avatar_url, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.username)
        .bind(&profile.full_name)
        .bind(&profile.avatar_url)
        .bind(&profile.bio)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Option<Profile>, sqlx::Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                username   = COALESCE($2, username),
                full_name  = COALESCE($3, full_name),
                avatar_url = COALESCE($4, avatar_url),
                bio        = COALESCE($5, bio),
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.username)
        .bind(&patch.full_name)
        .bind(&patch.avatar_url)
        .bind(&patch.bio)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, sqlx::Error> {
        let row: Option<(Json<UserSettings>,)> =
            sqlx::query_as("SELECT settings FROM user_settings WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(settings),)| settings))
    }

    async fn put_settings(&self, user_id: &str, settings: &UserSettings) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, settings, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET settings = EXCLUDED.settings, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(Json(settings))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
