//! Aggregation orchestrator — spawns one fetch task per source and applies
//! the selected completion policy.


use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::{HeadlineFetcher, HttpHeadlineFetcher};
use crate::policy::{Policy, compose};
use crate::pool::WorkerPool;
use crate::task::FetchTask;
use crate::types::{AggregationResult, Event, Source, TaskState};

/// Capacity of the lifecycle event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Concurrent headline aggregator.
///
/// Owns the fetcher, a handle to the worker pool, and the event channel.
/// Every task spawned by [`aggregate`](HeadlineAggregator::aggregate) is
/// owned by that call: the call does not return until each of its tasks is
/// terminal or has been explicitly cancelled, and tasks never leak into a
/// subsequent call.
pub struct HeadlineAggregator {
    fetcher: Arc<dyn HeadlineFetcher>,
    pool: WorkerPool,
    event_tx: broadcast::Sender<Event>,
}

impl HeadlineAggregator {
    /// Create an aggregator with the production HTTP fetcher and a worker
    /// pool sized from `config.max_concurrent_fetches`.
    ///
    /// # Errors
    /// Returns [`Error::Http`] if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let pool = WorkerPool::new(config.max_concurrent_fetches);
        let fetcher = Arc::new(HttpHeadlineFetcher::new(&config)?);
        Ok(Self::with_fetcher(fetcher, pool))
    }

    /// Create an aggregator from parts.
    ///
    /// Lets callers share one process-wide [`WorkerPool`] across several
    /// aggregators, or substitute the fetcher implementation.
    pub fn with_fetcher(fetcher: Arc<dyn HeadlineFetcher>, pool: WorkerPool) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            fetcher,
            pool,
            event_tx,
        }
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The worker pool this aggregator submits fetches to
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Shut down the worker pool.
    ///
    /// No further fetches are admitted; aggregate calls made afterwards fail
    /// with [`Error::ShuttingDown`].
    pub fn shutdown(&self) {
        tracing::info!("shutting down worker pool");
        self.pool.shutdown();
    }

    /// Fetch every source concurrently and combine the outcomes under `policy`.
    ///
    /// All tasks are submitted up front without waiting for admission; the
    /// worker pool enforces the concurrency ceiling by queuing the excess.
    /// Result composition always follows source submission order, never
    /// completion order. Duplicates in `sources` each produce an independent
    /// fetch.
    ///
    /// # Errors
    /// - [`Error::NoSources`] if `sources` is empty
    /// - [`Error::ShuttingDown`] if the pool has been shut down
    /// - under [`Policy::FailFast`], the first failing task's error
    pub async fn aggregate(
        &self,
        sources: &[Source],
        policy: Policy,
    ) -> Result<AggregationResult> {
        if sources.is_empty() {
            return Err(Error::NoSources);
        }
        if self.pool.is_shut_down() {
            return Err(Error::ShuttingDown);
        }

        tracing::debug!(sources = sources.len(), policy = ?policy, "starting aggregation");

        // One cancellation token per aggregate call; tasks of other calls are
        // unaffected by a fail-fast abort here.
        let cancel = CancellationToken::new();
        let tasks: Vec<FetchTask> = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                FetchTask::spawn(
                    index,
                    source.clone(),
                    Arc::clone(&self.fetcher),
                    self.pool.clone(),
                    cancel.child_token(),
                    self.event_tx.clone(),
                )
            })
            .collect();

        let result = match policy {
            Policy::FailFast => self.wait_fail_fast(tasks, &cancel).await?,
            Policy::BestEffortSilent | Policy::BestEffortReported => {
                self.wait_best_effort(tasks, policy).await
            }
        };

        self.event_tx
            .send(Event::AggregationComplete {
                succeeded: result.succeeded_count,
                failed: result.failed_count,
            })
            .ok();

        Ok(result)
    }

    /// Await each task in submission order, aborting on the first failure.
    async fn wait_fail_fast(
        &self,
        tasks: Vec<FetchTask>,
        cancel: &CancellationToken,
    ) -> Result<AggregationResult> {
        let total = tasks.len();
        let mut titles = Vec::new();

        for task in tasks {
            match task.await_result().await {
                Ok(fetched) => titles.extend(fetched),
                Err(error) => {
                    // Unsettled siblings observe this at their next
                    // cancellation checkpoint; we stop waiting on them.
                    cancel.cancel();
                    tracing::debug!(error = %error, "aggregation aborted");
                    return Err(error);
                }
            }
        }

        Ok(AggregationResult {
            titles,
            succeeded_count: total,
            failed_count: 0,
            failures: Vec::new(),
        })
    }

    /// Await every task to settlement, then compose under the policy.
    async fn wait_best_effort(&self, tasks: Vec<FetchTask>, policy: Policy) -> AggregationResult {
        let mut outcomes = Vec::with_capacity(tasks.len());
        for task in tasks {
            let outcome = task.await_settled().await;
            if outcome.state != TaskState::Completed {
                tracing::warn!(
                    source = %outcome.source,
                    state = ?outcome.state,
                    "fetch did not complete"
                );
            }
            outcomes.push(outcome);
        }

        compose(policy, outcomes)
    }
}
