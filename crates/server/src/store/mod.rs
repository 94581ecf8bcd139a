//! Chat storage module
//!
//! `ChatService` owns the single shared chat and its data file. Queries take
//! the read lock; mutations hold the write lock until the chat is saved.

pub mod json_store;

pub use json_store::{load, read_chat, save, write_chat};

use crate::chat::{Chat, ChatError};
use crate::models::{Message, User};
use std::path::PathBuf;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::info;

pub struct ChatService {
    chat: RwLock<Chat>,
    path: PathBuf,
}

impl ChatService {
    /// Load the chat stored at `path`, or start empty
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let chat = load(&path).await;
        Self::with_chat(chat, path)
    }

    pub fn with_chat(chat: Chat, path: impl Into<PathBuf>) -> Self {
        Self {
            chat: RwLock::new(chat),
            path: path.into(),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Chat> {
        self.chat.read().await
    }

    pub async fn snapshot(&self) -> Chat {
        self.chat.read().await.clone()
    }

    pub async fn add_user(&self, user: User) -> Result<(), ChatError> {
        let mut chat = self.chat.write().await;
        let email = user.email.clone();
        chat.add_user(user)?;
        save(&chat, &self.path).await;

        info!("Registered user {}", email);
        Ok(())
    }

    pub async fn add_message(&self, message: Message) -> Result<(), ChatError> {
        let mut chat = self.chat.write().await;
        let (sender, receiver) = (message.sender_email.clone(), message.receiver_email.clone());
        chat.add_message(message)?;
        save(&chat, &self.path).await;

        info!("Stored message {} -> {}", sender, receiver);
        Ok(())
    }

    /// Swap in a whole new chat and persist it
    pub async fn replace(&self, new_chat: Chat) {
        let mut chat = self.chat.write().await;
        *chat = new_chat;
        save(&chat, &self.path).await;

        info!(
            "Replaced chat: {} users, {} messages",
            chat.user_count(),
            chat.message_count()
        );
    }
}
