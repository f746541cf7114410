use std::sync::Arc;

use crate::auth::provider::AuthProvider;
use crate::auth::session::SessionStore;
use crate::circles::room::RoomHub;
use crate::classify::Classifier;
use crate::journal::pipeline::JournalPipeline;
use crate::journal::store::JournalStore;
use crate::moderation::gate::ModerationGate;
use crate::moderation::store::QuestionStore;
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external collaborator sits behind a trait object so tests can swap in
/// in-memory stores and a scripted oracle.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Classifier,
    pub journal: Arc<dyn JournalStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth: Arc<dyn AuthProvider>,
    /// Live circle rooms. In-process only; rooms vanish on restart.
    pub rooms: Arc<RoomHub>,
}

impl AppState {
    pub fn journal_pipeline(&self) -> JournalPipeline {
        JournalPipeline::new(self.classifier.clone(), self.journal.clone())
    }

    pub fn moderation_gate(&self) -> ModerationGate {
        ModerationGate::new(self.classifier.oracle().clone())
    }
}
