//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; authentication is delegated to AuthService.

use std::path::PathBuf;
use std::sync::Arc;
use tg_leave::adapters::persistence::{CredentialsFile, CsvReportStore, SelectionFile};
use tg_leave::adapters::telegram::{GrammersAuthAdapter, GrammersTgGateway, session};
use tg_leave::adapters::ui::tui::{self, InquireLoginPrompt, TuiInputPort};
use tg_leave::domain::DomainError;
use tg_leave::ports::{AuthPort, InputPort, ReportPort, SelectionPort, TgGateway};
use tg_leave::shared::config::AppConfig;
use tg_leave::usecases::{AuthService, FetchService, LeaveService};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv::dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tg_leave::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        error!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });
    let paths = cfg.paths();
    info!(
        session = %paths.session.display(),
        credentials = %paths.credentials.display(),
        selection = %paths.selection.display(),
        reports = %paths.reports_dir.display(),
        "file locations"
    );

    let credentials_store = CredentialsFile::new(&paths.credentials);

    // --- Connect + auth; a failed attempt is reported and may be retried ---
    let connection = loop {
        match connect_and_authenticate(&credentials_store, &cfg, &paths.session).await {
            Ok(conn) => break conn,
            Err(e) => {
                error!(error = %e, "login failed");
                println!("{}", e);
                let again = inquire::Confirm::new("Try again?")
                    .with_default(true)
                    .prompt()
                    .unwrap_or(false);
                if !again {
                    return Ok(());
                }
            }
        }
    };

    // --- Adapters ---
    let tg: Arc<dyn TgGateway> = Arc::new(GrammersTgGateway::new(
        connection.client,
        connection.runner,
    ));
    let selection: Arc<dyn SelectionPort> = Arc::new(SelectionFile::new(&paths.selection));
    let reports: Arc<dyn ReportPort> = Arc::new(CsvReportStore::new(&paths.reports_dir));

    // --- Services ---
    let leave_delay = cfg.leave_delay();
    info!(
        leave_delay_ms = leave_delay.as_millis() as u64,
        "leave rate limit: {} ms between groups",
        leave_delay.as_millis()
    );
    let fetch_service = Arc::new(FetchService::new(Arc::clone(&tg)));
    let leave_service = Arc::new(LeaveService::new(Arc::clone(&tg), reports, leave_delay));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        fetch_service,
        leave_service,
        selection,
    ));

    let result = input_port.run().await;
    tg.disconnect().await;
    result.map_err(|e| anyhow::anyhow!("{}", e))
}

/// Collect credentials, open the session and log in.
async fn connect_and_authenticate(
    credentials_store: &CredentialsFile,
    cfg: &AppConfig,
    session_path: &std::path::Path,
) -> Result<session::Connection, DomainError> {
    let creds = tui::collect_credentials(credentials_store, cfg.credentials()).await?;
    let api_id = creds.api_id_number()?;
    println!("Connecting to Telegram...");

    let conn = session::connect(session_path, api_id)
        .await
        .map_err(|e| DomainError::Auth(format!("{:#}", e)))?;
    let auth: Arc<dyn AuthPort> = Arc::new(GrammersAuthAdapter::new(conn.client.clone()));
    if let Err(e) = AuthService::new(auth)
        .run_auth_flow(&creds, &InquireLoginPrompt)
        .await
    {
        conn.runner.abort();
        return Err(e);
    }
    println!("Connected to Telegram successfully");
    Ok(conn)
}
