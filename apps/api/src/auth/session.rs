//! Session capability.
//!
//! A `Session` is created on sign-in, passed explicitly to every operation that
//! acts on behalf of a user, and invalidated on sign-out. It lives in Redis
//! under `session:<token>` with a TTL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::checkin::state::CheckIn;

/// Identity as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
    /// The user's current check-in; cleared on sign-out with the session.
    #[serde(default)]
    pub check_in: CheckIn,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            identity,
            created_at: Utc::now(),
            check_in: CheckIn::default(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.identity.uid
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores (or overwrites) a session and restarts its TTL.
    async fn put(&self, session: &Session) -> Result<(), SessionError>;

    /// Overwrites a session only if it is still live, keeping its TTL.
    /// Returns false when the session has expired or been revoked meanwhile.
    async fn replace(&self, session: &Session) -> Result<bool, SessionError>;

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionError>;

    /// Returns true if a live session was removed.
    async fn revoke(&self, token: &str) -> Result<bool, SessionError>;
}

pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &Session) -> Result<(), SessionError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(session_key(&session.token))
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Stored session for user {}", session.user_id());
        Ok(())
    }

    async fn replace(&self, session: &Session) -> Result<bool, SessionError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(session_key(&session.token))
            .arg(payload)
            .arg("XX")
            .arg("KEEPTTL")
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = redis::cmd("GET")
            .arg(session_key(token))
            .query_async(&mut conn)
            .await?;
        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let removed: i64 = redis::cmd("DEL")
            .arg(session_key(token))
            .query_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }
}
