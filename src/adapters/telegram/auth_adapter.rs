//! Implements AuthPort using grammers Client.
//!
//! Keeps the login token and password token between calls of the auth flow.

use crate::domain::{DomainError, SignInResult};
use crate::ports::AuthPort;
use async_trait::async_trait;
use grammers_client::client::{LoginToken, PasswordToken};
use grammers_client::{Client, SignInError};
use tokio::sync::Mutex;
use tracing::info;

pub struct GrammersAuthAdapter {
    client: Client,
    login_token: Mutex<Option<LoginToken>>,
    password_token: Mutex<Option<PasswordToken>>,
}

impl GrammersAuthAdapter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            login_token: Mutex::new(None),
            password_token: Mutex::new(None),
        }
    }
}

fn auth_err(step: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Auth(format!("{}: {}", step, e))
}

#[async_trait]
impl AuthPort for GrammersAuthAdapter {
    async fn is_authenticated(&self) -> Result<bool, DomainError> {
        self.client
            .is_authorized()
            .await
            .map_err(|e| auth_err("check authorization", e))
    }

    async fn request_login_code(&self, phone: &str, api_hash: &str) -> Result<(), DomainError> {
        let token = self
            .client
            .request_login_code(phone, api_hash)
            .await
            .map_err(|e| auth_err("request login code", e))?;
        *self.login_token.lock().await = Some(token);
        *self.password_token.lock().await = None;
        info!("login code requested");
        Ok(())
    }

    async fn sign_in(&self, code: &str) -> Result<SignInResult, DomainError> {
        let token = self
            .login_token
            .lock()
            .await
            .take()
            .ok_or_else(|| DomainError::Auth("no login code was requested".into()))?;
        match self.client.sign_in(&token, code).await {
            Ok(_user) => Ok(SignInResult::Success),
            Err(SignInError::PasswordRequired(pt)) => {
                let hint = pt.hint().map(String::from);
                *self.password_token.lock().await = Some(pt);
                Ok(SignInResult::PasswordRequired { hint })
            }
            Err(SignInError::InvalidCode) => Err(DomainError::Auth(
                "Invalid login code. Check your credentials and try again.".into(),
            )),
            Err(SignInError::SignUpRequired) => Err(DomainError::Auth(
                "This phone number has no Telegram account.".into(),
            )),
            Err(e) => Err(auth_err("sign in", e)),
        }
    }

    async fn check_password(&self, password: &[u8]) -> Result<(), DomainError> {
        let pt = self
            .password_token
            .lock()
            .await
            .take()
            .ok_or_else(|| DomainError::Auth("no password was requested".into()))?;
        self.client
            .check_password(pt, password)
            .await
            .map_err(|e| auth_err("check password", e))?;
        Ok(())
    }
}
