//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod classifier;
pub mod entities;
pub mod errors;
pub mod selection;
pub mod view;

pub use classifier::{classify, classify_all};
pub use entities::{
    Credentials, Entity, EntityKind, LeaveOutcome, LeaveReportRow, PeerHandle, PeerSpace,
    RawDialog, SignInResult,
};
pub use errors::DomainError;
pub use selection::KeepSet;
pub use view::{SortKey, TypeFilter, ViewQuery, view};
