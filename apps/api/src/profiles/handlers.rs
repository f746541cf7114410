//! Axum route handlers for profile and settings.

use axum::{extract::State, Json};

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::models::profile::{Profile, ProfilePatch};
use crate::profiles::settings::UserSettings;
use crate::profiles::{ensure_profile, settings_or_default};
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<Profile>, AppError> {
    let profile = ensure_profile(state.profiles.as_ref(), &session.identity).await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Profile>, AppError> {
    if let Some(username) = &patch.username {
        if username.trim().is_empty() {
            return Err(AppError::Validation("username cannot be blank".to_string()));
        }
    }
    ensure_profile(state.profiles.as_ref(), &session.identity).await?;
    let profile = state
        .profiles
        .update(session.user_id(), &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<UserSettings>, AppError> {
    let settings = settings_or_default(state.profiles.as_ref(), session.user_id()).await?;
    Ok(Json(settings))
}

/// PUT /api/v1/settings
pub async fn handle_put_settings(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Json(settings): Json<UserSettings>,
) -> Result<Json<UserSettings>, AppError> {
    if settings.preferences.language.trim().is_empty() {
        return Err(AppError::Validation("language cannot be empty".to_string()));
    }
    state
        .profiles
        .put_settings(session.user_id(), &settings)
        .await?;
    Ok(Json(settings))
}
