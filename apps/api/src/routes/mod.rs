pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::checkin::handlers as checkin;
use crate::circles::handlers as circles;
use crate::classify::handlers as analyze;
use crate::journal::handlers as journal;
use crate::moderation::handlers as questions;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-out", post(auth::handle_sign_out))
        .route(
            "/api/v1/auth/reset-password",
            post(auth::handle_reset_password),
        )
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Profile and settings
        .route(
            "/api/v1/profile",
            get(profiles::handle_get_profile).patch(profiles::handle_update_profile),
        )
        .route(
            "/api/v1/settings",
            get(profiles::handle_get_settings).put(profiles::handle_put_settings),
        )
        // Check-in
        .route(
            "/api/v1/checkin",
            get(checkin::handle_get_check_in).delete(checkin::handle_clear_check_in),
        )
        .route("/api/v1/checkin/labels", get(checkin::handle_list_labels))
        .route("/api/v1/checkin/text", post(checkin::handle_text_check_in))
        .route(
            "/api/v1/checkin/scores",
            post(checkin::handle_scores_check_in),
        )
        .route(
            "/api/v1/checkin/manual",
            post(checkin::handle_manual_check_in),
        )
        // Journal
        .route(
            "/api/v1/journal",
            get(journal::handle_list_entries).post(journal::handle_create_entry),
        )
        .route("/api/v1/journal/stats", get(journal::handle_journal_stats))
        .route("/api/v1/journal/export", get(journal::handle_export_journal))
        .route(
            "/api/v1/journal/:id",
            get(journal::handle_get_entry)
                .patch(journal::handle_update_entry)
                .delete(journal::handle_delete_entry),
        )
        // Q&A
        .route(
            "/api/v1/questions",
            get(questions::handle_list_questions).post(questions::handle_ask_question),
        )
        // Circles
        .route("/api/v1/circles", get(circles::handle_list_circles))
        .route("/api/v1/circles/:slug", get(circles::handle_get_circle))
        .route("/api/v1/circles/:slug/ws", get(circles::handle_room_socket))
        // Direct classification
        .route(
            "/api/v1/analyze/sentiment",
            post(analyze::handle_analyze_sentiment),
        )
        .route(
            "/api/v1/analyze/emotion",
            post(analyze::handle_analyze_emotion),
        )
        .with_state(state)
}
