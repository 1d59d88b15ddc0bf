//! Inbound ports. UI (adapter) calls into the application, and answers it.

use crate::domain::DomainError;

/// Input port: the interactive surface that drives the application.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run until the operator quits.
    async fn run(&self) -> Result<(), DomainError>;
}

/// Operator answers needed during login.
pub trait LoginPrompt: Send + Sync {
    fn login_code(&self) -> Result<String, DomainError>;

    fn password(&self, hint: Option<&str>) -> Result<String, DomainError>;
}
