//! Application configuration. File locations, throttle, fallback credentials.

use crate::domain::Credentials;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SESSION_PATH: &str = "telegram_group_manager_session.db";
pub const DEFAULT_CREDENTIALS_PATH: &str = "telegram_config.txt";
pub const DEFAULT_SELECTION_PATH: &str = "groups_to_keep.txt";
pub const DEFAULT_LEAVE_DELAY_MS: u64 = 1000;

/// Read from `TG_LEAVE_*` environment variables (and `.env`), plus an optional
/// file named by `TG_LEAVE_CONFIG`.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Fallback API id when the credentials file is absent. Read from TG_LEAVE_API_ID.
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub api_hash: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub session_path: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<String>,
    #[serde(default)]
    pub selection_path: Option<String>,
    /// Directory for `leave_log_*.csv`. Defaults to the working directory.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Pause between leave calls. Read from TG_LEAVE_LEAVE_DELAY_MS.
    #[serde(default)]
    pub leave_delay_ms: Option<u64>,
}

/// Resolved file locations, handed to adapters at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub session: PathBuf,
    pub credentials: PathBuf,
    pub selection: PathBuf,
    pub reports_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("TG_LEAVE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("TG_LEAVE"));
        c.build()?.try_deserialize()
    }

    pub fn paths(&self) -> AppPaths {
        AppPaths {
            session: path_or(&self.session_path, DEFAULT_SESSION_PATH),
            credentials: path_or(&self.credentials_path, DEFAULT_CREDENTIALS_PATH),
            selection: path_or(&self.selection_path, DEFAULT_SELECTION_PATH),
            reports_dir: path_or(&self.reports_dir, "."),
        }
    }

    pub fn leave_delay(&self) -> Duration {
        Duration::from_millis(self.leave_delay_ms.unwrap_or(DEFAULT_LEAVE_DELAY_MS))
    }

    /// Credentials from config, if all three parts are set.
    pub fn credentials(&self) -> Option<Credentials> {
        Some(Credentials {
            api_id: self.api_id.clone()?,
            api_hash: self.api_hash.clone()?,
            phone: self.phone.clone()?,
        })
    }
}

fn path_or(value: &Option<String>, default: &str) -> PathBuf {
    PathBuf::from(value.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(default))
}
