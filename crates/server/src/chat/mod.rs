//! In-memory chat directory
//!
//! Holds the users (keyed and ordered by email) and the append-only
//! message log, and enforces the uniqueness and referential rules.

pub mod random;

use crate::models::{Message, User};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a mutation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("user email is missing")]
    MissingEmail,

    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("sender {0} is not a registered user")]
    UnknownSender(String),

    #[error("receiver {0} is not a registered user")]
    UnknownReceiver(String),
}

/// Selects messages by their sender and/or receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFilter<'a> {
    Sender(&'a str),
    Receiver(&'a str),
    Conversation { sender: &'a str, receiver: &'a str },
}

impl MessageFilter<'_> {
    pub fn matches(&self, message: &Message) -> bool {
        match *self {
            MessageFilter::Sender(sender) => message.sender_email == sender,
            MessageFilter::Receiver(receiver) => message.receiver_email == receiver,
            MessageFilter::Conversation { sender, receiver } => {
                message.sender_email == sender && message.receiver_email == receiver
            }
        }
    }
}

/// Users and messages of the whole service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chat {
    users: BTreeMap<String, User>,
    messages: Vec<Message>,
}

impl Chat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. The chat is left untouched on error.
    pub fn add_user(&mut self, user: User) -> Result<(), ChatError> {
        if user.email.is_empty() {
            return Err(ChatError::MissingEmail);
        }
        if self.email_exists(&user.email) {
            return Err(ChatError::DuplicateEmail(user.email));
        }

        self.users.insert(user.email.clone(), user);
        Ok(())
    }

    /// Append a message. Both participants must already be registered.
    pub fn add_message(&mut self, message: Message) -> Result<(), ChatError> {
        if !self.email_exists(&message.sender_email) {
            return Err(ChatError::UnknownSender(message.sender_email));
        }
        if !self.email_exists(&message.receiver_email) {
            return Err(ChatError::UnknownReceiver(message.receiver_email));
        }

        self.messages.push(message);
        Ok(())
    }

    pub fn email_exists(&self, email: &str) -> bool {
        !email.is_empty() && self.users.contains_key(email)
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    /// All users in ascending email order
    pub fn users(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    /// Users in ascending email order, skipping `offset` and taking at most `limit`
    pub fn users_page(&self, limit: usize, offset: usize) -> Vec<User> {
        self.users.values().skip(offset).take(limit).cloned().collect()
    }

    /// Messages in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages matching `filter`, in insertion order
    pub fn messages_by(&self, filter: MessageFilter<'_>) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    pub fn messages_from(&self, sender: &str) -> Vec<Message> {
        self.messages_by(MessageFilter::Sender(sender))
    }

    pub fn messages_to(&self, receiver: &str) -> Vec<Message> {
        self.messages_by(MessageFilter::Receiver(receiver))
    }

    pub fn messages_between(&self, sender: &str, receiver: &str) -> Vec<Message> {
        self.messages_by(MessageFilter::Conversation { sender, receiver })
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
