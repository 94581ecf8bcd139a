use serde::{Deserialize, Serialize};

/// A registered user. The email is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub email: String,
}

impl User {
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
        }
    }
}

/// A message between two registered users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub sender_email: String,
    pub receiver_email: String,
}

impl Message {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        sender_email: impl Into<String>,
        receiver_email: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            sender_email: sender_email.into(),
            receiver_email: receiver_email.into(),
        }
    }
}
