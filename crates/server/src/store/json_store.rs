//! JSON file persistence for the chat
//!
//! The whole chat is written as one document after every mutation and read
//! back at startup. Saving and loading are best effort: failures are logged
//! and never reach the caller.

use crate::chat::Chat;
use crate::models::{Message, User};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// On-disk shape of a chat, replayed through the chat rules on load
#[derive(Deserialize)]
struct ChatDocument {
    users: BTreeMap<String, User>,
    messages: Vec<Message>,
}

impl ChatDocument {
    fn into_chat(self) -> Chat {
        let mut chat = Chat::new();

        for (key, user) in self.users {
            if key != user.email {
                warn!("User stored under {:?} has email {:?}", key, user.email);
            }
            if let Err(e) = chat.add_user(user) {
                warn!("Dropping stored user: {}", e);
            }
        }

        for message in self.messages {
            if let Err(e) = chat.add_message(message) {
                warn!("Dropping stored message: {}", e);
            }
        }

        chat
    }
}

/// Serialize `chat` as a pretty JSON document into `writer`
pub fn write_chat<W: Write>(chat: &Chat, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, chat).context("Failed to serialize chat")?;
    Ok(())
}

/// Read a chat document from `reader`
pub fn read_chat<R: Read>(reader: R) -> Result<Chat> {
    let document: ChatDocument =
        serde_json::from_reader(reader).context("Failed to parse chat JSON")?;
    Ok(document.into_chat())
}

/// Sibling temp file: `chat.json` -> `chat.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn try_save(chat: &Chat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    let mut json = Vec::new();
    write_chat(chat, &mut json)?;

    // Write to temp file, then rename over the target
    let temp = temp_path(path);
    fs::write(&temp, json)
        .await
        .with_context(|| format!("Failed to write {:?}", temp))?;

    if let Err(e) = fs::rename(&temp, path).await {
        let _ = fs::remove_file(&temp).await;
        return Err(e).with_context(|| format!("Failed to replace {:?}", path));
    }

    Ok(())
}

/// Save `chat` to `path`, replacing any previous content.
///
/// Errors are logged and swallowed; a failed save leaves the previous file in place.
pub async fn save(chat: &Chat, path: &Path) {
    match try_save(chat, path).await {
        Ok(()) => debug!(
            "Saved chat ({} users, {} messages) to {:?}",
            chat.user_count(),
            chat.message_count(),
            path
        ),
        Err(e) => warn!("Could not save chat to {:?}: {:#}", path, e),
    }
}

/// Load a chat from `path`. Any failure yields an empty chat.
pub async fn load(path: &Path) -> Chat {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No chat file at {:?}, starting empty", path);
            return Chat::new();
        }
        Err(e) => {
            warn!("Failed to read chat file {:?}: {}", path, e);
            return Chat::new();
        }
    };

    match read_chat(content.as_slice()) {
        Ok(chat) => {
            info!(
                "Loaded chat from {:?}: {} users, {} messages",
                path,
                chat.user_count(),
                chat.message_count()
            );
            chat
        }
        Err(e) => {
            warn!("Failed to load chat from {:?}: {:#}", path, e);
            Chat::new()
        }
    }
}
