//! WebMessages Chat Server Library
//!
//! A small directory of users and messages, persisted as one JSON document.

pub mod chat;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;
pub mod store;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{AppState, ServerConfig};
use store::ChatService;

pub use router::router;

/// Install the global fmt subscriber; later calls are ignored
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn run() -> anyhow::Result<()> {
    run_with_config(ServerConfig::default()).await
}

pub async fn run_with_config(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing();

    info!("=== WebMessages Chat Server ===");

    config.ensure_dirs().await?;
    info!("Chat data file: {:?}", config.data_file);

    // The one chat instance for the process, shared through router state
    let service = ChatService::open(&config.data_file).await;
    let app = router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
