//! Leave orchestrator: leave every given entity, one at a time, with a fixed delay.
//!
//! - Resolves each entity through its kind's identity space, then leaves it
//! - Per-entity failures become `Failed` rows; the run always continues
//! - Each row goes to the report before the next entity starts
//! - Sleeps `delay` after every entity, the last one included

use crate::domain::{DomainError, Entity, LeaveOutcome, LeaveReportRow};
use crate::ports::{ReportPort, TgGateway};
use crate::usecases::jobs::ProgressSender;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pause between two leave calls. Telegram penalizes rapid-fire requests.
pub const DEFAULT_LEAVE_DELAY: Duration = Duration::from_secs(1);

pub const LEFT_SUCCESSFULLY: &str = "Left successfully.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one leave run.
#[derive(Debug, Clone)]
pub struct LeaveRun {
    pub rows: Vec<LeaveReportRow>,
    pub report_path: PathBuf,
}

impl LeaveRun {
    pub fn succeeded(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.outcome == LeaveOutcome::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }
}

pub struct LeaveService {
    tg: Arc<dyn TgGateway>,
    reports: Arc<dyn ReportPort>,
    delay: Duration,
}

impl LeaveService {
    pub fn new(tg: Arc<dyn TgGateway>, reports: Arc<dyn ReportPort>, delay: Duration) -> Self {
        Self { tg, reports, delay }
    }

    /// Leave `entities` in order. Strictly sequential: never more than one call in flight.
    ///
    /// Fails only if the report cannot be created, before anything is left.
    pub async fn leave_all(
        &self,
        entities: &[Entity],
        progress: &ProgressSender,
    ) -> Result<LeaveRun, DomainError> {
        let mut report = self.reports.create(Local::now())?;
        let total = entities.len();
        info!(total, report = %report.location().display(), "leave run started");
        progress.status(format!("Leaving {} groups...", total));

        let mut rows = Vec::with_capacity(total);
        for (i, entity) in entities.iter().enumerate() {
            progress.progress(percent(i, total));
            progress.status(format!("Leaving group: {}", entity.name));

            let (outcome, detail_message) = match self.leave_one(entity).await {
                Ok(()) => {
                    info!(entity_id = entity.id, kind = %entity.kind, "left");
                    (LeaveOutcome::Success, LEFT_SUCCESSFULLY.to_string())
                }
                Err(e) => {
                    warn!(entity_id = entity.id, kind = %entity.kind, error = %e, "leave failed");
                    (LeaveOutcome::Failure, e.to_string())
                }
            };
            let row = LeaveReportRow {
                entity_id: entity.id,
                entity_name: entity.name.clone(),
                outcome,
                detail_message,
                timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            };
            if let Err(e) = report.append(&row) {
                warn!(entity_id = entity.id, error = %e, "could not write report row");
            }
            rows.push(row);

            tokio::time::sleep(self.delay).await;
        }

        progress.progress(100);
        let report_path = report.location().to_path_buf();
        let run = LeaveRun { rows, report_path };
        info!(
            succeeded = run.succeeded(),
            failed = run.failed(),
            report = %run.report_path.display(),
            "leave run complete"
        );
        progress.status(format!(
            "Operation complete. Results saved to {}",
            run.report_path.display()
        ));
        Ok(run)
    }

    async fn leave_one(&self, entity: &Entity) -> Result<(), DomainError> {
        let handle = self.tg.resolve(entity.kind, entity.id).await?;
        self.tg.leave(&handle).await
    }
}

/// Share of entities processed before entity `index` starts, truncated.
fn percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (index * 100 / total) as u8
}
