//! Implements TgGateway using grammers Client.
//!
//! Handles are cached by identity space while listing dialogs, so resolving during a
//! leave run normally costs no extra getDialogs round trip. No FloodWait retries:
//! a failed call is reported to the caller as-is.

use crate::adapters::telegram::mapper::{self, LeaveRequest};
use crate::domain::{DomainError, EntityKind, PeerHandle, PeerSpace, RawDialog};
use crate::ports::TgGateway;
use async_trait::async_trait;
use grammers_client::tl;
use grammers_client::{Client, InvocationError};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Telegram gateway adapter. Wraps a grammers Client (clone shared with the auth adapter).
pub struct GrammersTgGateway {
    client: Client,
    runner: Mutex<Option<JoinHandle<()>>>,
    handle_cache: Mutex<HashMap<(PeerSpace, i64), PeerHandle>>,
}

impl GrammersTgGateway {
    /// `runner` is the sender-pool task; it is aborted on `disconnect`.
    pub fn new(client: Client, runner: JoinHandle<()>) -> Self {
        Self {
            client,
            runner: Mutex::new(Some(runner)),
            handle_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Walk all dialogs, caching every group/channel handle seen.
    ///
    /// `on_dialog` receives each dialog's name, flags and handle.
    async fn scan_dialogs(
        &self,
        mut on_dialog: impl FnMut(&str, bool, bool, Option<PeerHandle>),
    ) -> Result<(), InvocationError> {
        let mut dialogs = self.client.iter_dialogs();
        while let Some(dialog) = dialogs.next().await? {
            let peer = dialog.peer();
            let handle = match peer.to_ref().await {
                Some(peer_ref) => {
                    let input_peer: tl::enums::InputPeer = peer_ref.into();
                    mapper::handle_from_input_peer(&input_peer)
                }
                None => None,
            };
            if let Some(h) = handle {
                self.handle_cache.lock().await.insert((h.space(), h.id()), h);
            }
            let (megagroup, broadcast) = mapper::peer_flags(peer);
            on_dialog(peer.name().unwrap_or_default(), megagroup, broadcast, handle);
        }
        Ok(())
    }
}

#[async_trait]
impl TgGateway for GrammersTgGateway {
    async fn list_dialogs(&self) -> Result<Vec<RawDialog>, DomainError> {
        let mut out = Vec::new();
        let mut skipped = 0usize;
        self.scan_dialogs(|name, megagroup, broadcast, handle| {
            match mapper::raw_dialog(name, megagroup, broadcast, handle) {
                Some(raw) => out.push(raw),
                None => skipped += 1,
            }
        })
        .await
        .map_err(|e| DomainError::Fetch(e.to_string()))?;
        info!(count = out.len(), skipped, "listed dialogs");
        Ok(out)
    }

    async fn resolve(&self, kind: EntityKind, id: i64) -> Result<PeerHandle, DomainError> {
        let key = (kind.peer_space(), id);
        if let Some(h) = self.handle_cache.lock().await.get(&key) {
            return Ok(*h);
        }
        debug!(entity_id = id, %kind, "handle not cached, rescanning dialogs");
        self.scan_dialogs(|_, _, _, _| {})
            .await
            .map_err(|e| DomainError::Resolution(e.to_string()))?;
        self.handle_cache
            .lock()
            .await
            .get(&key)
            .copied()
            .ok_or_else(|| {
                DomainError::Resolution(format!("{} {} not found in dialogs", kind, id))
            })
    }

    async fn leave(&self, handle: &PeerHandle) -> Result<(), DomainError> {
        let result = match mapper::leave_request(handle) {
            LeaveRequest::Channel(req) => self.client.invoke(&req).await.map(drop),
            LeaveRequest::BasicChat(req) => self.client.invoke(&req).await.map(drop),
        };
        result.map_err(|e| DomainError::Leave(e.to_string()))?;
        debug!(entity_id = handle.id(), "left");
        Ok(())
    }

    async fn disconnect(&self) {
        if let Some(runner) = self.runner.lock().await.take() {
            runner.abort();
            info!("disconnected from Telegram");
        }
    }
}
