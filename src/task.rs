//! Fetch task — one in-flight fetch attempt bound to a single source.
//!
//! A task is created by and owned by exactly one aggregate call. It moves
//! Pending → Running when the worker pool admits it, and settles exactly once
//! as Completed, Failed, or Cancelled. Cancellation is cooperative: it is
//! checked before admission and raced against the fetch itself, never a
//! preemptive interruption mid-I/O.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, FetchError, Result};
use crate::fetcher::HeadlineFetcher;
use crate::pool::WorkerPool;
use crate::types::{Event, Source, TaskState};

/// Terminal record of a single fetch attempt.
///
/// `titles` is non-empty only when `state` is Completed; `error` is present
/// only when `state` is Failed.
#[derive(Clone, Debug)]
pub(crate) struct TaskOutcome {
    /// Position of the source in the submitted sequence; result composition
    /// orders by this, never by completion order.
    pub(crate) index: usize,
    pub(crate) source: Source,
    pub(crate) state: TaskState,
    pub(crate) titles: Vec<String>,
    pub(crate) error: Option<FetchError>,
}

impl TaskOutcome {
    fn completed(index: usize, source: Source, titles: Vec<String>) -> Self {
        Self {
            index,
            source,
            state: TaskState::Completed,
            titles,
            error: None,
        }
    }

    fn failed(index: usize, source: Source, error: FetchError) -> Self {
        Self {
            index,
            source,
            state: TaskState::Failed,
            titles: Vec::new(),
            error: Some(error),
        }
    }

    fn cancelled(index: usize, source: Source) -> Self {
        Self {
            index,
            source,
            state: TaskState::Cancelled,
            titles: Vec::new(),
            error: None,
        }
    }
}

/// One spawned fetch attempt, owned by the aggregate call that created it.
pub(crate) struct FetchTask {
    index: usize,
    source: Source,
    handle: JoinHandle<TaskOutcome>,
}

impl FetchTask {
    /// Spawn a fetch for `source` onto the runtime.
    ///
    /// Submission is fire-and-forget: the spawned task waits for a pool
    /// permit itself, so the caller never blocks on admission. The pool, not
    /// the caller, enforces the concurrency ceiling.
    pub(crate) fn spawn(
        index: usize,
        source: Source,
        fetcher: Arc<dyn HeadlineFetcher>,
        pool: WorkerPool,
        cancel: CancellationToken,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        let task_source = source.clone();
        let handle = tokio::spawn(async move {
            let source = task_source;

            // Admission checkpoint: a task cancelled while still queued never
            // starts its fetch.
            let permit = tokio::select! {
                _ = cancel.cancelled() => {
                    return settle(&event_tx, TaskOutcome::cancelled(index, source));
                }
                permit = pool.acquire() => match permit {
                    Ok(permit) => permit,
                    // Pool shut down while queued; same observable outcome as
                    // cancellation.
                    Err(_) => {
                        return settle(&event_tx, TaskOutcome::cancelled(index, source));
                    }
                },
            };
            let _permit = permit;

            event_tx
                .send(Event::FetchStarted {
                    source: source.clone(),
                })
                .ok();

            let outcome = tokio::select! {
                _ = cancel.cancelled() => TaskOutcome::cancelled(index, source),
                fetched = fetcher.fetch_titles(&source) => match fetched {
                    Ok(titles) => TaskOutcome::completed(index, source, titles),
                    Err(error) => TaskOutcome::failed(index, source, error),
                },
            };

            settle(&event_tx, outcome)
        });

        Self {
            index,
            source,
            handle,
        }
    }

    /// Wait until terminal, propagating failure.
    ///
    /// Completed yields the fetched titles; Failed yields the task's stored
    /// error; Cancelled yields a cancellation error.
    pub(crate) async fn await_result(self) -> Result<Vec<String>> {
        let outcome = self.await_settled().await;
        match outcome.state {
            TaskState::Completed => Ok(outcome.titles),
            TaskState::Cancelled => Err(Error::Cancelled {
                source: outcome.source,
            }),
            _ => Err(Error::SourceFailed {
                source: outcome.source,
                error: outcome.error.unwrap_or_else(|| {
                    FetchError::Network("fetch task failed without an error".into())
                }),
            }),
        }
    }

    /// Wait until terminal without propagating failure.
    ///
    /// Always returns the terminal outcome, leaving the caller to decide what
    /// to do with failures. This is what enables the best-effort policies.
    pub(crate) async fn await_settled(self) -> TaskOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                tracing::error!(source = %self.source, error = %join_error, "fetch task panicked");
                TaskOutcome::failed(
                    self.index,
                    self.source,
                    FetchError::Network(format!("fetch task panicked: {join_error}")),
                )
            }
        }
    }
}

fn settle(event_tx: &broadcast::Sender<Event>, outcome: TaskOutcome) -> TaskOutcome {
    event_tx
        .send(Event::FetchSettled {
            source: outcome.source.clone(),
            state: outcome.state,
        })
        .ok();
    outcome
}
