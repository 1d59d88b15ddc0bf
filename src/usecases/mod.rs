//! Application use cases. Orchestrate domain logic via ports.

pub mod auth_service;
pub mod fetch_service;
pub mod jobs;
pub mod leave_service;

pub use auth_service::AuthService;
pub use fetch_service::FetchService;
pub use jobs::{JobEvent, JobHandle, JobRunner, ProgressSender};
pub use leave_service::{DEFAULT_LEAVE_DELAY, LeaveRun, LeaveService};
