//! File-backed persistence: keep-list, credentials, leave reports.

pub mod credentials_file;
pub mod csv_report;
pub mod selection_file;

pub use credentials_file::CredentialsFile;
pub use csv_report::{CsvReportSink, CsvReportStore};
pub use selection_file::SelectionFile;
