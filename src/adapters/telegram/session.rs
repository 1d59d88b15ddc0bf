//! Session management and connection bootstrap.
//!
//! Uses grammers-session's SqliteSession for persistent file-based storage so
//! authorization is preserved across application restarts.

use grammers_client::Client;
use grammers_session::storages::SqliteSession;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Opens a persistent session storage at the given path.
///
/// The file is created if it does not exist. Parent directories are created as needed.
pub async fn open_file_session(path: impl AsRef<Path>) -> anyhow::Result<SqliteSession> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("create session directory: {}", e))?;
    }
    SqliteSession::open(path)
        .await
        .map_err(|e| anyhow::anyhow!("open session file: {}", e))
}

/// A connected client plus the background task driving its sender pool.
pub struct Connection {
    pub client: Client,
    pub runner: JoinHandle<()>,
}

/// Create a grammers Client on the session at `session_path`.
///
/// The client is not necessarily authorized yet; run the auth flow next.
pub async fn connect(session_path: &Path, api_id: i32) -> anyhow::Result<Connection> {
    let session = Arc::new(open_file_session(session_path).await?);
    let pool = grammers_client::SenderPool::new(session, api_id);
    let handle = pool.handle.clone();
    let runner = tokio::spawn(async move {
        pool.runner.run().await;
    });
    info!(session = %session_path.display(), "connected to Telegram");
    Ok(Connection {
        client: Client::new(handle),
        runner,
    })
}
