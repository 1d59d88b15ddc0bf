//! Implements CredentialsPort: three lines, API id / API hash / phone.

use crate::domain::{Credentials, DomainError};
use crate::ports::CredentialsPort;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Fewer than three lines means "no credentials".
fn parse(contents: &str) -> Option<Credentials> {
    let mut lines = contents.lines().map(str::trim);
    Some(Credentials {
        api_id: lines.next()?.to_string(),
        api_hash: lines.next()?.to_string(),
        phone: lines.next()?.to_string(),
    })
}

#[async_trait::async_trait]
impl CredentialsPort for CredentialsFile {
    async fn load(&self) -> Option<Credentials> {
        match fs::read_to_string(&self.path).await {
            Ok(s) => {
                let creds = parse(&s);
                if creds.is_none() {
                    debug!(path = %self.path.display(), "credentials file has fewer than 3 lines");
                }
                creds
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "error loading credentials");
                None
            }
        }
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), DomainError> {
        let body = format!(
            "{}\n{}\n{}\n",
            credentials.api_id.trim(),
            credentials.api_hash.trim(),
            credentials.phone.trim()
        );
        fs::write(&self.path, body)
            .await
            .map_err(|e| DomainError::Storage(format!("save credentials: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_files_are_absent() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("123\nabc\n"), None);
    }

    #[test]
    fn lines_are_trimmed() {
        let creds = parse(" 123 \nabcdef\n+15550000\nextra\n").unwrap();
        assert_eq!(creds.api_id, "123");
        assert_eq!(creds.api_hash, "abcdef");
        assert_eq!(creds.phone, "+15550000");
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialsFile::new(dir.path().join("telegram_config.txt"));
        assert_eq!(store.load().await, None);

        let creds = Credentials {
            api_id: "12345".into(),
            api_hash: "0123456789abcdef".into(),
            phone: "+12345678901".into(),
        };
        store.save(&creds).await.unwrap();
        assert_eq!(store.load().await, Some(creds));
        let raw = std::fs::read_to_string(dir.path().join("telegram_config.txt")).unwrap();
        assert_eq!(raw, "12345\n0123456789abcdef\n+12345678901\n");
    }
}
