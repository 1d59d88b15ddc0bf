//! Background jobs: one tokio task at a time, with a stream of status/progress events.
//!
//! The slot is held from `submit` until the task finishes (or panics); while it is held
//! `submit` refuses new work, which is how the surface disables its triggers.

use crate::domain::DomainError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Status(String),
    /// Percentage, 0..=100.
    Progress(u8),
}

/// Sending half handed to a job. Events are dropped if nobody listens.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<JobEvent>,
}

impl ProgressSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<JobEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn status(&self, message: impl Into<String>) {
        let _ = self.tx.send(JobEvent::Status(message.into()));
    }

    pub fn progress(&self, percent: u8) {
        let _ = self.tx.send(JobEvent::Progress(percent.min(100)));
    }
}

/// A submitted job: its events, then its result.
pub struct JobHandle<T> {
    events: mpsc::UnboundedReceiver<JobEvent>,
    task: JoinHandle<Result<T, DomainError>>,
}

impl<T> JobHandle<T> {
    /// Next event; `None` once the job has finished and all events were read.
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        self.events.recv().await
    }

    pub async fn join(self) -> Result<T, DomainError> {
        self.task
            .await
            .map_err(|e| DomainError::Job(e.to_string()))?
    }
}

struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobRunner {
    busy: Arc<AtomicBool>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Spawn `job` unless another job is in flight (then `None`).
    pub fn submit<T, F, Fut>(&self, job: F) -> Option<JobHandle<T>>
    where
        F: FnOnce(ProgressSender) -> Fut,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
        T: Send + 'static,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("background job already running; request ignored");
            return None;
        }
        let guard = SlotGuard(Arc::clone(&self.busy));
        let (progress, events) = ProgressSender::channel();
        let fut = job(progress);
        let task = tokio::spawn(async move {
            let _guard = guard;
            fut.await
        });
        Some(JobHandle { events, task })
    }
}
