//! Domain entities. Pure data structures for the core business.
//!
//! No Telegram/IO types here; adapters map into these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group, supergroup, or channel the user belongs to.
///
/// `id` is the only stable identity; `name` is for display and search only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: i64, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Group,
    Supergroup,
    Channel,
}

impl EntityKind {
    /// Identity space the platform resolves this kind through.
    ///
    /// Supergroups live on the channel space; only basic groups do not.
    pub fn peer_space(self) -> PeerSpace {
        match self {
            EntityKind::Group => PeerSpace::BasicChat,
            EntityKind::Supergroup | EntityKind::Channel => PeerSpace::Channel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Group => "group",
            EntityKind::Supergroup => "supergroup",
            EntityKind::Channel => "channel",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerSpace {
    Channel,
    BasicChat,
}

/// Dialog as listed by the gateway, before classification.
///
/// Flags mirror the platform attributes; they are not mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDialog {
    pub id: i64,
    pub name: String,
    pub megagroup: bool,
    pub basic_chat_id: Option<i64>,
    pub broadcast: bool,
}

/// Live handle needed to issue a leave call. Produced by `TgGateway::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerHandle {
    Channel { channel_id: i64, access_hash: i64 },
    BasicChat { chat_id: i64 },
}

impl PeerHandle {
    pub fn space(&self) -> PeerSpace {
        match self {
            PeerHandle::Channel { .. } => PeerSpace::Channel,
            PeerHandle::BasicChat { .. } => PeerSpace::BasicChat,
        }
    }

    /// Bare platform id within its identity space.
    pub fn id(&self) -> i64 {
        match *self {
            PeerHandle::Channel { channel_id, .. } => channel_id,
            PeerHandle::BasicChat { chat_id } => chat_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Success,
    Failure,
}

impl LeaveOutcome {
    /// Value of the report's `Status` column.
    pub fn as_status(self) -> &'static str {
        match self {
            LeaveOutcome::Success => "Success",
            LeaveOutcome::Failure => "Failed",
        }
    }
}

/// One processed entity of a leave run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReportRow {
    pub entity_id: i64,
    pub entity_name: String,
    pub outcome: LeaveOutcome,
    pub detail_message: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

/// API credentials and phone number used to log in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub api_id: String,
    pub api_hash: String,
    pub phone: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.api_id.trim().is_empty()
            && !self.api_hash.trim().is_empty()
            && !self.phone.trim().is_empty()
    }

    /// Numeric API id, as the client library needs it.
    pub fn api_id_number(&self) -> Result<i32, DomainError> {
        self.api_id
            .trim()
            .parse()
            .map_err(|_| DomainError::Config(format!("API ID must be numeric, got {:?}", self.api_id)))
    }
}

/// Result of submitting a login code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInResult {
    Success,
    PasswordRequired { hint: Option<String> },
}
