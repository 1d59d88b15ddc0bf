//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Credentials, DomainError, EntityKind, LeaveReportRow, PeerHandle, RawDialog, SignInResult,
};
use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::path::Path;

/// Telegram API gateway. List dialogs, resolve entities, leave them.
#[async_trait::async_trait]
pub trait TgGateway: Send + Sync {
    /// Fetch all dialogs the user participates in. Errors are `DomainError::Fetch`.
    async fn list_dialogs(&self) -> Result<Vec<RawDialog>, DomainError>;

    /// Resolve a live handle for `id` through the identity space of `kind`.
    async fn resolve(&self, kind: EntityKind, id: i64) -> Result<PeerHandle, DomainError>;

    /// Leave the resolved entity: "leave channel" for channel-space handles,
    /// "remove self as participant" for basic chats.
    async fn leave(&self, handle: &PeerHandle) -> Result<(), DomainError>;

    /// Close the connection. Best effort.
    async fn disconnect(&self);
}

/// Login / 2FA against the Telegram session.
#[async_trait::async_trait]
pub trait AuthPort: Send + Sync {
    async fn is_authenticated(&self) -> Result<bool, DomainError>;

    async fn request_login_code(&self, phone: &str, api_hash: &str) -> Result<(), DomainError>;

    async fn sign_in(&self, code: &str) -> Result<SignInResult, DomainError>;

    async fn check_password(&self, password: &[u8]) -> Result<(), DomainError>;
}

/// Persisted set of entity ids to keep.
#[async_trait::async_trait]
pub trait SelectionPort: Send + Sync {
    /// Never fails: missing or unreadable storage yields an empty set.
    async fn load(&self) -> HashSet<i64>;

    /// Overwrite storage with exactly `ids`.
    async fn save(&self, ids: &HashSet<i64>) -> Result<(), DomainError>;
}

/// Persisted API credentials.
#[async_trait::async_trait]
pub trait CredentialsPort: Send + Sync {
    /// `None` when absent or malformed.
    async fn load(&self) -> Option<Credentials>;

    async fn save(&self, credentials: &Credentials) -> Result<(), DomainError>;
}

/// Leave report storage. One fresh report per run.
pub trait ReportPort: Send + Sync {
    /// Create the report for a run started at `started_at`.
    fn create(&self, started_at: DateTime<Local>) -> Result<Box<dyn ReportSink>, DomainError>;
}

/// Append-only report of a single run. Each row is durable once `append` returns.
pub trait ReportSink: Send {
    fn append(&mut self, row: &LeaveReportRow) -> Result<(), DomainError>;

    fn location(&self) -> &Path;
}
