//! Route table
//!
//! Chat routes live under `/chat`, next to a plain health check.

use crate::config::AppState;
use crate::handlers::{
    add_message, add_user, get_all_users, get_user_by_email, get_users, health_check, index,
    messages_by_receiver, messages_by_sender, messages_sender_receiver, random_chat,
};
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        // Whole chat
        .route("/chat", get(index))
        .route("/chat/random-chat", post(random_chat))
        // Users
        .route("/chat/get-user-by-email", get(get_user_by_email))
        .route("/chat/get-all-users", get(get_all_users))
        .route("/chat/get-users", get(get_users))
        .route("/chat/add-user", post(add_user))
        // Messages
        .route("/chat/get-messages-by-sender", get(messages_by_sender))
        .route("/chat/get-messages-by-receiver", get(messages_by_receiver))
        .route(
            "/chat/get-messages-sender-receiver",
            get(messages_sender_receiver),
        )
        .route("/chat/add-message", post(add_message))
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
