//! Axum route handlers for sign-in, sign-up, sign-out, and password reset.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::provider::AuthError;
use crate::auth::session::{Identity, Session};
use crate::auth::AuthSession;
use crate::checkin::state::CheckIn;
use crate::errors::AppError;
use crate::profiles::ensure_profile;
use crate::profiles::settings::UserSettings;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub identity: Identity,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub identity: Identity,
    pub check_in: CheckIn,
}

fn check_credentials(req: &CredentialsRequest) -> Result<(), AppError> {
    if !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".to_string()));
    }
    Ok(())
}

/// Opens a session for a verified identity and makes sure a profile exists.
async fn open_session(state: &AppState, identity: Identity) -> Result<SessionResponse, AppError> {
    ensure_profile(state.profiles.as_ref(), &identity).await?;
    let session = Session::new(identity);
    state.sessions.put(&session).await?;
    info!("Session opened for user {}", session.user_id());
    Ok(SessionResponse {
        token: session.token,
        identity: session.identity,
    })
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    check_credentials(&req)?;
    let identity = state.auth.sign_in(req.email.trim(), &req.password).await?;
    Ok(Json(open_session(&state, identity).await?))
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    check_credentials(&req)?;
    let identity = state
        .auth
        .sign_up(req.email.trim(), &req.password)
        .await
        .map_err(|e| match e {
            AuthError::Rejected(reason) => AppError::Validation(reason),
            other => other.into(),
        })?;
    state
        .profiles
        .put_settings(&identity.uid, &UserSettings::default())
        .await?;
    let response = open_session(&state, identity).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<StatusCode, AppError> {
    state.sessions.revoke(&session.token).await?;
    info!("Session closed for user {}", session.user_id());
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    if !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    state
        .auth
        .send_password_reset(req.email.trim())
        .await
        .map_err(|e| match e {
            AuthError::Rejected(reason) => AppError::Validation(reason),
            other => other.into(),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(AuthSession(session): AuthSession) -> Json<MeResponse> {
    Json(MeResponse {
        identity: session.identity,
        check_in: session.check_in,
    })
}
