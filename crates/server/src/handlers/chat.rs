//! Whole-chat handlers

use crate::{chat::Chat, config::AppState};
use axum::{extract::State, Json};
use tracing::info;

/// GET /chat
pub async fn index(State(state): State<AppState>) -> Json<Chat> {
    info!("GET /chat");
    Json(state.chat.snapshot().await)
}

/// POST /chat/random-chat
///
/// Replaces the whole chat with random users and messages.
pub async fn random_chat(State(state): State<AppState>) -> Json<Chat> {
    info!("POST /chat/random-chat");

    let chat = Chat::random(&mut rand::thread_rng());
    state.chat.replace(chat.clone()).await;

    Json(chat)
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK - WebMessages Chat Server"
}
