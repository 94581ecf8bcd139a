//! HTTP handlers for the chat directory
//!
//! Handlers translate store outcomes into status codes; they hold no state
//! of their own.

pub mod chat;
pub mod messages;
pub mod users;

// Re-export AppState from config
pub use crate::config::AppState;

pub use chat::{health_check, index, random_chat};

pub use messages::{add_message, messages_by_receiver, messages_by_sender, messages_sender_receiver};

pub use users::{add_user, get_all_users, get_user_by_email, get_users};
