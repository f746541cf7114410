mod auth;
mod checkin;
mod circles;
mod classify;
mod config;
mod db;
mod errors;
mod journal;
mod llm_client;
mod models;
mod moderation;
mod profiles;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::provider::FirebaseAuthClient;
use crate::auth::session::RedisSessionStore;
use crate::circles::room::RoomHub;
use crate::classify::oracle::LlmOracle;
use crate::classify::Classifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::journal::store::PgJournalStore;
use crate::llm_client::LlmClient;
use crate::moderation::store::PgQuestionStore;
use crate::profiles::store::PgProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MindBridge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis session store
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs));
    info!("Session store initialized (ttl {}s)", config.session_ttl_secs);

    // Initialize classifier oracle
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.oracle_max_attempts,
    )?
    .with_endpoint(config.anthropic_api_url.clone());
    info!(
        "LLM client initialized (model: {}, attempts: {})",
        llm_client::MODEL,
        llm.max_attempts()
    );
    let classifier = Classifier::new(Arc::new(LlmOracle(llm)));

    let state = AppState {
        classifier,
        journal: Arc::new(PgJournalStore::new(db.clone())),
        profiles: Arc::new(PgProfileStore::new(db.clone())),
        questions: Arc::new(PgQuestionStore::new(db)),
        sessions,
        auth: Arc::new(FirebaseAuthClient::new(config.firebase_api_key.clone())),
        rooms: Arc::new(RoomHub::new(config.circle_channel_capacity)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client's domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
