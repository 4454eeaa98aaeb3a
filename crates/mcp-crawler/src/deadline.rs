//! Deadline race between a spawned crawl task and a wall-clock timer.
//!
//! On expiry the task's handle is dropped, which detaches the task instead of
//! aborting it. In-flight fetches keep running and write into state nobody
//! reads anymore; no cancellation is threaded through the HTTP client.

use crate::types::{CrawlStatus, timeout_message};
use std::any::Any;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

/// Outcome of [`race`].
#[derive(Debug)]
pub(crate) enum RaceOutcome<T> {
    /// The task finished before the deadline.
    Finished(T),
    /// The task panicked or was cancelled; carries a description.
    Failed(String),
    /// The deadline fired first.
    TimedOut,
}

/// Waits for `task` for at most `deadline`.
pub(crate) async fn race<T>(task: JoinHandle<T>, deadline: Duration) -> RaceOutcome<T> {
    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(value)) => RaceOutcome::Finished(value),
        Ok(Err(join_error)) => RaceOutcome::Failed(describe_join_error(join_error)),
        Err(_elapsed) => RaceOutcome::TimedOut,
    }
}

/// Turns a settled race into the crawl status, message and result snapshot.
///
/// `results` must be read under the same guard for the whole call, so a
/// timeout message always counts exactly the entries returned.
pub(crate) fn settle<R: Clone>(
    outcome: RaceOutcome<()>,
    deadline: Duration,
    results: &[R],
) -> (CrawlStatus, Option<String>, Vec<R>) {
    let (status, message) = match outcome {
        RaceOutcome::Finished(()) => (CrawlStatus::Complete, None),
        RaceOutcome::TimedOut => (
            CrawlStatus::Timeout,
            Some(timeout_message(deadline, results.len())),
        ),
        RaceOutcome::Failed(message) => (CrawlStatus::Error, Some(message)),
    };
    (status, message, results.to_vec())
}

fn describe_join_error(error: JoinError) -> String {
    if error.is_panic() {
        let payload = error.into_panic();
        format!("crawl task panicked: {}", panic_message(payload.as_ref()))
    } else {
        "crawl task was cancelled".to_string()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
