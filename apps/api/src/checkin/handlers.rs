//! Axum route handlers for the emotion check-in flow.
//!
//! The current check-in lives on the caller's session; every transition is written
//! back through the session store before responding.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::session::Session;
use crate::auth::AuthSession;
use crate::checkin::mapping::{find_ui_label, trending, ui_label_for_emotion, UiLabel, UI_LABELS};
use crate::checkin::state::{detect_from_scores, CheckIn, CheckInSource, EmotionScores};
use crate::checkin::{suggestions_for, Suggestions};
use crate::classify::labels::Emotion;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub labels: Vec<UiLabel>,
    pub trending: Vec<UiLabel>,
}

#[derive(Debug, Deserialize)]
pub struct TextCheckInRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoresCheckInRequest {
    pub source: CheckInSource,
    pub scores: EmotionScores,
}

#[derive(Debug, Deserialize)]
pub struct ManualCheckInRequest {
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub check_in: CheckIn,
    /// Classifier label behind a text check-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
}

impl CheckInResponse {
    fn new(check_in: CheckIn, emotion: Option<Emotion>) -> Self {
        let suggestions = check_in.label().map(suggestions_for);
        Self {
            check_in,
            emotion,
            suggestions,
        }
    }
}

async fn store_check_in(
    state: &AppState,
    mut session: Session,
    check_in: CheckIn,
) -> Result<CheckIn, AppError> {
    session.check_in = check_in.clone();
    // A sign-out may have landed while the oracle was busy; never resurrect it.
    if !state.sessions.replace(&session).await? {
        return Err(AppError::Unauthorized);
    }
    if let Some(label) = check_in.label() {
        info!("User {} checked in as {label}", session.user_id());
    }
    Ok(check_in)
}

/// GET /api/v1/checkin/labels
pub async fn handle_list_labels() -> Json<LabelsResponse> {
    Json(LabelsResponse {
        labels: UI_LABELS.to_vec(),
        trending: trending().into_iter().copied().collect(),
    })
}

/// POST /api/v1/checkin/text
///
/// Classifies free text into a primary emotion. Oracle failures settle on the
/// "I'm not sure" sentinel instead of erroring.
pub async fn handle_text_check_in(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(req): Json<TextCheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let detecting = session.check_in.begin(CheckInSource::Text)?;
    let result = state.classifier.emotion(&req.text).await?;

    let now = Utc::now();
    let check_in = if result.fallback {
        detecting.fail(now)?
    } else {
        detecting.complete(ui_label_for_emotion(result.emotion), now)?
    };

    let check_in = store_check_in(&state, session, check_in).await?;
    Ok(Json(CheckInResponse::new(check_in, Some(result.emotion))))
}

/// POST /api/v1/checkin/scores
pub async fn handle_scores_check_in(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(req): Json<ScoresCheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    if !req.scores.is_valid() {
        return Err(AppError::Validation(
            "Scores must be numbers between 0 and 1".to_string(),
        ));
    }
    let detecting = session.check_in.begin(req.source)?;
    let check_in = detecting.complete(detect_from_scores(&req.scores), Utc::now())?;

    let check_in = store_check_in(&state, session, check_in).await?;
    Ok(Json(CheckInResponse::new(check_in, None)))
}

/// POST /api/v1/checkin/manual
pub async fn handle_manual_check_in(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(req): Json<ManualCheckInRequest>,
) -> Result<Json<CheckInResponse>, AppError> {
    let label = find_ui_label(&req.label)
        .ok_or_else(|| AppError::Validation(format!("Unknown emotion label '{}'", req.label)))?;
    let check_in = session.check_in.select(label, Utc::now());

    let check_in = store_check_in(&state, session, check_in).await?;
    Ok(Json(CheckInResponse::new(check_in, label.emotion)))
}

/// GET /api/v1/checkin
pub async fn handle_get_check_in(AuthSession(session): AuthSession) -> Json<CheckInResponse> {
    Json(CheckInResponse::new(session.check_in, None))
}

/// DELETE /api/v1/checkin
pub async fn handle_clear_check_in(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<StatusCode, AppError> {
    let cleared = session.check_in.clear();
    store_check_in(&state, session, cleared).await?;
    Ok(StatusCode::NO_CONTENT)
}
