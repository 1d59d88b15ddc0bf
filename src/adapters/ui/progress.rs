//! Render a background job's events with indicatif and return its result.

use crate::domain::DomainError;
use crate::usecases::{JobEvent, JobHandle};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Percentage bar (0..=100) for leave runs.
pub fn percent_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>3}% {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    bar
}

/// Spinner for work without a known length (fetching dialogs).
pub fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Drive `bar` from the job's events until it ends, then return the job's result.
pub async fn follow<T>(mut job: JobHandle<T>, bar: ProgressBar) -> Result<T, DomainError> {
    let mut last_status = String::new();
    while let Some(event) = job.next_event().await {
        match event {
            JobEvent::Status(s) => {
                bar.set_message(s.clone());
                last_status = s;
            }
            JobEvent::Progress(p) => bar.set_position(u64::from(p)),
        }
    }
    let result = job.join().await;
    match &result {
        Ok(_) => bar.finish_with_message(last_status),
        Err(_) => bar.abandon(),
    }
    result
}
