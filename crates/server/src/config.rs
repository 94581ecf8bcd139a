//! Chat server configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::store::ChatService;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "CHAT_PORT";

const DEFAULT_PORT: u16 = 5000;

/// Configuration for the chat server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// JSON document holding the whole chat
    pub data_file: PathBuf,
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let port = std::env::var(PORT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            data_file: chat_common::chat_file_path(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
        }
    }
}

impl ServerConfig {
    /// Create config with custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: chat_common::chat_file_in(base_dir.into()),
            ..Self::default()
        }
    }

    /// Ensure the data file's directory exists
    pub async fn ensure_dirs(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}
