//! Axum route handlers for direct classification.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthSession;
use crate::classify::validator::{EmotionResult, SentimentResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/v1/analyze/sentiment
pub async fn handle_analyze_sentiment(
    State(state): State<AppState>,
    _auth: AuthSession,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SentimentResult>, AppError> {
    Ok(Json(state.classifier.sentiment(&req.text).await?))
}

/// POST /api/v1/analyze/emotion
pub async fn handle_analyze_emotion(
    State(state): State<AppState>,
    _auth: AuthSession,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<EmotionResult>, AppError> {
    Ok(Json(state.classifier.emotion(&req.text).await?))
}
