//! Message handlers

use crate::{
    chat::{Chat, MessageFilter},
    config::AppState,
    error::{ApiError, Result},
    extract::{AppJson, AppQuery},
    models::Message,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderQuery {
    pub sender_email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverQuery {
    pub receiver_email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub sender_email: Option<String>,
    pub receiver_email: Option<String>,
}

fn require_user(chat: &Chat, email: &str) -> Result<()> {
    if chat.email_exists(email) {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("user {} not found", email)))
    }
}

/// GET /chat/get-messages-by-sender
pub async fn messages_by_sender(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SenderQuery>,
) -> Result<Json<Vec<Message>>> {
    let sender = query.sender_email.unwrap_or_default();
    info!("GET /chat/get-messages-by-sender - {}", sender);

    let chat = state.chat.read().await;
    require_user(&chat, &sender)?;
    let messages = chat.messages_by(MessageFilter::Sender(&sender));
    Ok(Json(messages))
}

/// GET /chat/get-messages-by-receiver
pub async fn messages_by_receiver(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ReceiverQuery>,
) -> Result<Json<Vec<Message>>> {
    let receiver = query.receiver_email.unwrap_or_default();
    info!("GET /chat/get-messages-by-receiver - {}", receiver);

    let chat = state.chat.read().await;
    require_user(&chat, &receiver)?;
    let messages = chat.messages_by(MessageFilter::Receiver(&receiver));
    Ok(Json(messages))
}

/// GET /chat/get-messages-sender-receiver
pub async fn messages_sender_receiver(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ConversationQuery>,
) -> Result<Json<Vec<Message>>> {
    let sender = query.sender_email.unwrap_or_default();
    let receiver = query.receiver_email.unwrap_or_default();
    info!(
        "GET /chat/get-messages-sender-receiver - {} -> {}",
        sender, receiver
    );

    let chat = state.chat.read().await;
    require_user(&chat, &sender)?;
    require_user(&chat, &receiver)?;
    let messages = chat.messages_by(MessageFilter::Conversation {
        sender: &sender,
        receiver: &receiver,
    });
    Ok(Json(messages))
}

/// POST /chat/add-message
pub async fn add_message(
    State(state): State<AppState>,
    AppJson(message): AppJson<Message>,
) -> Result<(StatusCode, Json<Message>)> {
    info!(
        "POST /chat/add-message - {} -> {}",
        message.sender_email, message.receiver_email
    );

    if message.subject.is_empty() {
        return Err(ApiError::BadRequest("subject is required".to_string()));
    }

    match state.chat.add_message(message.clone()).await {
        Ok(()) => Ok((StatusCode::CREATED, Json(message))),
        Err(e) => {
            warn!("Add message failed: {}", e);
            Err(e.into())
        }
    }
}
