//! Test doubles: a scripted oracle, a stub identity provider, in-memory stores,
//! and a tracing layer that counts warnings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use uuid::Uuid;

use crate::auth::provider::{AuthError, AuthProvider};
use crate::auth::session::{Identity, Session, SessionError, SessionStore};
use crate::circles::room::RoomHub;
use crate::classify::oracle::{Oracle, RawEmotion, RawRephrase, RawSentiment};
use crate::classify::Classifier;
use crate::journal::store::JournalStore;
use crate::llm_client::LlmError;
use crate::models::journal::JournalEntry;
use crate::models::profile::{Profile, ProfilePatch};
use crate::models::question::QuestionRow;
use crate::moderation::store::QuestionStore;
use crate::profiles::settings::UserSettings;
use crate::profiles::store::ProfileStore;
use crate::state::AppState;

pub fn identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: format!("{uid}@example.com"),
        display_name: Some("Test User".to_string()),
        photo_url: None,
    }
}

// --- tracing ---

/// Counts WARN events on the current thread while alive.
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
    _guard: tracing::subscriber::DefaultGuard,
}

struct CountWarnings(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for CountWarnings {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl WarnCounter {
    pub fn install() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountWarnings(count.clone()));
        Self {
            count,
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

// --- oracle ---

/// Oracle that answers every flow from a script, or fails every call.
#[derive(Default)]
pub struct StubOracle {
    sentiment: Option<String>,
    emotion: Option<String>,
    rephrased: Option<String>,
    fail: bool,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl StubOracle {
    pub fn sentiment(label: &str) -> Self {
        Self {
            sentiment: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn emotion(label: &str) -> Self {
        Self {
            emotion: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn rephrase(text: &str) -> Self {
        Self {
            rephrased: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Holds every call until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn call(&self) -> Result<(), LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(LlmError::Api {
                status: 500,
                message: "stub oracle failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn classify_sentiment(&self, _text: &str) -> Result<RawSentiment, LlmError> {
        self.call().await?;
        Ok(RawSentiment {
            sentiment: self.sentiment.clone(),
            explanation: Some("stubbed".to_string()),
        })
    }

    async fn classify_emotion(&self, _text: &str) -> Result<RawEmotion, LlmError> {
        self.call().await?;
        Ok(RawEmotion {
            emotion: self.emotion.clone(),
        })
    }

    async fn rephrase(&self, _text: &str) -> Result<RawRephrase, LlmError> {
        self.call().await?;
        Ok(RawRephrase {
            rephrased_text: self.rephrased.clone(),
        })
    }
}

// --- auth ---

/// Accepts any password except "wrong"; sign-up rejects "taken@example.com".
pub struct StubAuthProvider;

#[async_trait]
impl AuthProvider for StubAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if password == "wrong" {
            return Err(AuthError::Rejected("INVALID_PASSWORD".to_string()));
        }
        Ok(identity_for(email))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<Identity, AuthError> {
        if email == "taken@example.com" {
            return Err(AuthError::Rejected("EMAIL_EXISTS".to_string()));
        }
        Ok(identity_for(email))
    }

    async fn send_password_reset(&self, _email: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

fn identity_for(email: &str) -> Identity {
    let uid = email.split('@').next().unwrap_or(email);
    Identity {
        email: email.to_string(),
        ..identity(uid)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session: &Session) -> Result<(), SessionError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn replace(&self, session: &Session) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(&session.token) {
            Some(existing) => {
                *existing = session.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn revoke(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.lock().unwrap().remove(token).is_some())
    }
}

// --- stores ---

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, Profile>>,
    settings: Mutex<HashMap<String, UserSettings>>,
}

impl MemoryProfileStore {
    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, id: &str) -> Result<Option<Profile>, sqlx::Error> {
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, profile: &Profile) -> Result<(), sqlx::Error> {
        self.profiles
            .lock()
            .unwrap()
            .entry(profile.id.clone())
            .or_insert_with(|| profile.clone());
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ProfilePatch) -> Result<Option<Profile>, sqlx::Error> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles.get_mut(id).map(|profile| {
            if let Some(v) = &patch.username {
                profile.username = Some(v.clone());
            }
            if let Some(v) = &patch.full_name {
                profile.full_name = Some(v.clone());
            }
            if let Some(v) = &patch.avatar_url {
                profile.avatar_url = Some(v.clone());
            }
            if let Some(v) = &patch.bio {
                profile.bio = Some(v.clone());
            }
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }

    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, sqlx::Error> {
        Ok(self.settings.lock().unwrap().get(user_id).cloned())
    }

    async fn put_settings(&self, user_id: &str, settings: &UserSettings) -> Result<(), sqlx::Error> {
        self.settings
            .lock()
            .unwrap()
            .insert(user_id.to_string(), settings.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryJournalStore {
    entries: Mutex<HashMap<Uuid, JournalEntry>>,
    fail_writes: bool,
}

impl MemoryJournalStore {
    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    fn check_write(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn create(&self, entry: &JournalEntry) -> Result<(), sqlx::Error> {
        self.check_write()?;
        self.entries.lock().unwrap().insert(entry.id, entry.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<JournalEntry>, sqlx::Error> {
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, entry: &JournalEntry) -> Result<bool, sqlx::Error> {
        self.check_write()?;
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(&entry.id) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        self.check_write()?;
        Ok(self.entries.lock().unwrap().remove(&id).is_some())
    }

    async fn list_by_author(&self, author_id: &str) -> Result<Vec<JournalEntry>, sqlx::Error> {
        let mut entries: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.author_id == author_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}

#[derive(Default)]
pub struct MemoryQuestionStore {
    questions: Mutex<Vec<QuestionRow>>,
}

impl MemoryQuestionStore {
    pub fn texts(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.text.clone())
            .collect()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn create(&self, question: &QuestionRow) -> Result<(), sqlx::Error> {
        self.questions.lock().unwrap().push(question.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let mut questions = self.questions.lock().unwrap().clone();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        questions.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(questions)
    }
}

// --- app state ---

/// Handles onto the in-memory collaborators behind a test `AppState`.
pub struct TestApp {
    pub state: AppState,
    pub oracle: Arc<StubOracle>,
    pub sessions: Arc<MemorySessionStore>,
    pub journal: Arc<MemoryJournalStore>,
    pub questions: Arc<MemoryQuestionStore>,
}

impl TestApp {
    pub fn new(oracle: StubOracle) -> Self {
        let oracle = Arc::new(oracle);
        let sessions = Arc::new(MemorySessionStore::default());
        let journal = Arc::new(MemoryJournalStore::default());
        let questions = Arc::new(MemoryQuestionStore::default());
        let state = AppState {
            classifier: Classifier::new(oracle.clone()),
            journal: journal.clone(),
            profiles: Arc::new(MemoryProfileStore::default()),
            questions: questions.clone(),
            sessions: sessions.clone(),
            auth: Arc::new(StubAuthProvider),
            rooms: Arc::new(RoomHub::new(16)),
        };
        Self {
            state,
            oracle,
            sessions,
            journal,
            questions,
        }
    }

    /// Stores a session for `uid` and returns its bearer token.
    pub async fn sign_in(&self, uid: &str) -> String {
        let session = Session::new(identity(uid));
        self.sessions.put(&session).await.unwrap();
        session.token
    }
}
