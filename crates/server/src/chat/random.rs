//! Random users, messages and chats for demos and fixtures

use super::Chat;
use crate::models::{Message, User};
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper bound (exclusive) for the number of users and messages in a random chat
pub const MAX_RANDOM_ENTRIES: usize = 20;

pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize, charset: &[u8]) -> String {
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

pub fn random_word<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    random_string(rng, len, UPPERCASE)
}

pub fn random_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}@{}.com",
        random_string(rng, 6, UPPERCASE),
        random_string(rng, 5, UPPERCASE)
    )
}

pub fn random_user<R: Rng + ?Sized>(rng: &mut R) -> User {
    let name_len = rng.gen_range(2..6);
    User::new(random_word(rng, name_len), random_email(rng))
}

/// A message between two users drawn from `users`. `None` when `users` is empty.
pub fn random_message<R: Rng + ?Sized>(rng: &mut R, users: &[User]) -> Option<Message> {
    if users.is_empty() {
        return None;
    }

    let subject = random_string(rng, 10, ALPHANUMERIC);
    let body = random_string(rng, 30, ALPHANUMERIC);
    let sender = &users[rng.gen_range(0..users.len())];
    let receiver = &users[rng.gen_range(0..users.len())];

    Some(Message::new(
        subject,
        body,
        sender.email.clone(),
        receiver.email.clone(),
    ))
}

impl Chat {
    /// Build a chat with 1..20 random users and 1..20 random messages between them.
    ///
    /// Colliding random emails are dropped like any other duplicate. The user
    /// list is taken once before messages are generated.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut chat = Chat::new();

        let user_count = rng.gen_range(1..MAX_RANDOM_ENTRIES);
        for _ in 0..user_count {
            let _ = chat.add_user(random_user(rng));
        }

        let message_count = rng.gen_range(1..MAX_RANDOM_ENTRIES);
        let users = chat.users();
        for _ in 0..message_count {
            if let Some(message) = random_message(rng, &users) {
                let _ = chat.add_message(message);
            }
        }

        chat
    }
}
