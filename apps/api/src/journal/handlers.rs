//! Axum route handlers for the journal.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::journal::export::{export_entries, export_filename};
use crate::journal::pipeline::{JournalDraft, JournalPatch};
use crate::journal::stats::{compute_stats, JournalStats};
use crate::models::journal::JournalEntry;
use crate::state::AppState;

/// GET /api/v1/journal
pub async fn handle_list_entries(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let entries = state.journal_pipeline().list(&session).await?;
    Ok(Json(entries))
}

/// POST /api/v1/journal
pub async fn handle_create_entry(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(draft): Json<JournalDraft>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let entry = state.journal_pipeline().save(&session, draft).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/journal/:id
pub async fn handle_get_entry(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<JournalEntry>, AppError> {
    Ok(Json(state.journal_pipeline().get(&session, id).await?))
}

/// PATCH /api/v1/journal/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    Json(patch): Json<JournalPatch>,
) -> Result<Json<JournalEntry>, AppError> {
    let entry = state.journal_pipeline().update(&session, id, patch).await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/journal/:id
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.journal_pipeline().delete(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/journal/stats
pub async fn handle_journal_stats(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<JournalStats>, AppError> {
    let entries = state.journal_pipeline().list(&session).await?;
    Ok(Json(compute_stats(&entries, Utc::now())))
}

/// GET /api/v1/journal/export
///
/// Served as a download named `mindbridge-journal-<YYYY-MM-DD>.json`.
pub async fn handle_export_journal(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.journal_pipeline().list(&session).await?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));
    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(export_entries(&entries)),
    ))
}
