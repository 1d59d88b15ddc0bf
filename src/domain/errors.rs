//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Bad credentials, phone, code or password. Fatal to the current attempt.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Listing dialogs failed. The operator may retry.
    #[error("Failed to fetch dialogs: {0}")]
    Fetch(String),

    #[error("Could not resolve entity: {0}")]
    Resolution(String),

    #[error("Leave failed: {0}")]
    Leave(String),

    /// Selection, credentials or report file could not be read/written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive prompt failed or was cancelled by the operator.
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Background job panicked or was aborted.
    #[error("Background job failed: {0}")]
    Job(String),
}
