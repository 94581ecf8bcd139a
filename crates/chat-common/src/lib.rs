//! Centralized data directory management for WebMessages
//!
//! Directory layout:
//! ```text
//! chat_data/
//! └── chat.json        # Whole chat state (users + messages)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the data root
pub const ROOT_ENV: &str = "CHAT_ROOT";

/// Name of the chat state document inside the data root
pub const CHAT_FILE_NAME: &str = "chat.json";

#[derive(Serialize, Deserialize, Debug)]
struct RootConfig {
    chat_root: Option<PathBuf>,
}

/// Get the global configuration path
fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("webmessages").join("config.json"))
}

/// Read a root config file, returning the stored root if any
fn read_root_config(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<RootConfig>(&content) {
            Ok(config) => config.chat_root,
            Err(e) => {
                warn!("Failed to parse config file at {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read config file at {:?}: {}", path, e);
            None
        }
    }
}

/// Load the persistent root from the user config file
pub fn load_persistent_root() -> Option<PathBuf> {
    read_root_config(&get_config_path()?)
}

/// Get the data root from environment, persistent config, or default
pub fn chat_root() -> PathBuf {
    if let Ok(val) = std::env::var(ROOT_ENV) {
        return PathBuf::from(val);
    }

    if let Some(root) = load_persistent_root() {
        return root;
    }

    PathBuf::from("chat_data")
}

/// Path of the chat document under an explicit root
pub fn chat_file_in(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(CHAT_FILE_NAME)
}

/// Path of the chat document under the resolved data root
pub fn chat_file_path() -> PathBuf {
    chat_file_in(chat_root())
}
