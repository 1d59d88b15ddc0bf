//! Implements ReportPort with one CSV file per leave run. Uses the `csv` crate for quoting.
//!
//! Every row is flushed before `append` returns, so a crash leaves a valid partial report.

use crate::domain::{DomainError, LeaveReportRow};
use crate::ports::{ReportPort, ReportSink};
use chrono::{DateTime, Local};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_HEADER: [&str; 5] = ["Group ID", "Group Name", "Status", "Message", "Timestamp"];

/// Creates `leave_log_YYYYMMDD_HHMMSS.csv` files under `dir`.
pub struct CsvReportStore {
    dir: PathBuf,
}

impl CsvReportStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn report_path(&self, started_at: DateTime<Local>) -> PathBuf {
        self.dir.join(format!(
            "leave_log_{}.csv",
            started_at.format("%Y%m%d_%H%M%S")
        ))
    }
}

impl ReportPort for CsvReportStore {
    fn create(&self, started_at: DateTime<Local>) -> Result<Box<dyn ReportSink>, DomainError> {
        let path = self.report_path(started_at);
        let sink = CsvReportSink::create(path)?;
        info!(path = %sink.path.display(), "created leave report");
        Ok(Box::new(sink))
    }
}

pub struct CsvReportSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvReportSink {
    /// Create (or truncate) the file and write the header.
    pub fn create(path: PathBuf) -> Result<Self, DomainError> {
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| DomainError::Storage(format!("create {}: {}", path.display(), e)))?;
        writer
            .write_record(REPORT_HEADER)
            .and_then(|_| writer.flush().map_err(csv::Error::from))
            .map_err(|e| DomainError::Storage(format!("write report header: {}", e)))?;
        Ok(Self { path, writer })
    }
}

impl ReportSink for CsvReportSink {
    fn append(&mut self, row: &LeaveReportRow) -> Result<(), DomainError> {
        self.writer
            .write_record([
                row.entity_id.to_string().as_str(),
                row.entity_name.as_str(),
                row.outcome.as_status(),
                row.detail_message.as_str(),
                row.timestamp.as_str(),
            ])
            .map_err(|e| DomainError::Storage(format!("write report row: {}", e)))?;
        self.writer
            .flush()
            .map_err(|e| DomainError::Storage(format!("flush report: {}", e)))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeaveOutcome;
    use chrono::TimeZone;

    fn row(id: i64, name: &str, outcome: LeaveOutcome, msg: &str) -> LeaveReportRow {
        LeaveReportRow {
            entity_id: id,
            entity_name: name.to_string(),
            outcome,
            detail_message: msg.to_string(),
            timestamp: "2024-01-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn file_name_embeds_start_time() {
        let store = CsvReportStore::new("/reports");
        let started = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            store.report_path(started),
            PathBuf::from("/reports/leave_log_20240309_070501.csv")
        );
    }

    #[test]
    fn rows_are_readable_after_each_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReportStore::new(dir.path());
        let mut sink = store.create(Local::now()).unwrap();
        let path = sink.location().to_path_buf();

        sink.append(&row(1, "Alpha, the first", LeaveOutcome::Success, "Left successfully."))
            .unwrap();
        // Still open: the row must already be on disk.
        let partial = std::fs::read_to_string(&path).unwrap();
        assert_eq!(partial.lines().count(), 2);

        sink.append(&row(2, "Beta", LeaveOutcome::Failure, "CHANNEL_PRIVATE"))
            .unwrap();
        drop(sink);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, REPORT_HEADER);
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "Alpha, the first");
        assert_eq!(&records[0][2], "Success");
        assert_eq!(&records[1][0], "2");
        assert_eq!(&records[1][2], "Failed");
        assert_eq!(&records[1][3], "CHANNEL_PRIVATE");
    }

    #[test]
    fn unwritable_directory_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReportStore::new(dir.path().join("missing"));
        assert!(matches!(
            store.create(Local::now()),
            Err(DomainError::Storage(_))
        ));
    }
}
