//! Axum route handlers for Q&A questions.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::models::question::QuestionRow;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub text: String,
    #[serde(default)]
    pub is_anonymous: bool,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// A question as shown to others. Anonymous questions carry no author.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    pub is_anonymous: bool,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<QuestionRow> for QuestionView {
    fn from(row: QuestionRow) -> Self {
        Self {
            id: row.id,
            author_id: (!row.is_anonymous).then_some(row.author_id),
            is_anonymous: row.is_anonymous,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// POST /api/v1/questions
///
/// Runs the moderation gate; only the rephrased text is stored.
pub async fn handle_ask_question(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(req): Json<AskRequest>,
) -> Result<(StatusCode, Json<QuestionView>), AppError> {
    let text = state.moderation_gate().screen(&req.text).await?.into_accepted()?;

    let question = QuestionRow {
        id: Uuid::new_v4(),
        author_id: session.user_id().to_string(),
        is_anonymous: req.is_anonymous,
        text,
        created_at: Utc::now(),
    };
    state.questions.create(&question).await?;
    info!("Question {} submitted by user {}", question.id, session.user_id());

    Ok((StatusCode::CREATED, Json(question.into())))
}

/// GET /api/v1/questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
    _auth: AuthSession,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<QuestionView>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    let rows = state.questions.list_recent(limit).await?;
    Ok(Json(rows.into_iter().map(QuestionView::from).collect()))
}
