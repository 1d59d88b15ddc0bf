//! Handle Login / 2FA flow. Delegates to the AuthPort adapter and asks the operator via LoginPrompt.

use crate::domain::{Credentials, DomainError, SignInResult};
use crate::ports::{AuthPort, LoginPrompt};
use std::sync::Arc;
use tracing::info;

pub struct AuthService {
    auth: Arc<dyn AuthPort>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self { auth }
    }

    /// Run full auth flow (phone -> code -> 2FA if needed). No-op when already authorized.
    pub async fn run_auth_flow(
        &self,
        credentials: &Credentials,
        prompt: &dyn LoginPrompt,
    ) -> Result<(), DomainError> {
        if self.auth.is_authenticated().await? {
            info!("session already authorized");
            return Ok(());
        }

        self.auth
            .request_login_code(credentials.phone.trim(), credentials.api_hash.trim())
            .await?;
        let code = prompt.login_code()?;
        match self.auth.sign_in(code.trim()).await? {
            SignInResult::Success => {}
            SignInResult::PasswordRequired { hint } => {
                let password = prompt.password(hint.as_deref())?;
                self.auth.check_password(password.as_bytes()).await?;
            }
        }
        info!("signed in");
        Ok(())
    }
}
