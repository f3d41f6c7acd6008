//! Completion policies — pure decision logic over settled task outcomes.
//!
//! A policy governs how the aggregator waits on its tasks and how per-task
//! failures affect the final result. The composition logic here performs no
//! I/O; the wait/cancel protocols live in the aggregator.

use serde::{Deserialize, Serialize};

use crate::task::TaskOutcome;
use crate::types::{AggregationResult, SourceFailure, TaskState};

/// How the aggregator waits on and combines multiple tasks' outcomes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Abort the whole aggregate call on the first failure: cancel every
    /// unsettled sibling and surface the triggering error to the caller.
    FailFast,

    /// Collect whatever completed and drop failures without surfacing them;
    /// only `failed_count` records that anything went wrong.
    ///
    /// Retained for parity with callers that deliberately ignore failures.
    /// New callers should prefer [`Policy::BestEffortReported`] or
    /// [`Policy::FailFast`]: swallowing errors silently is almost never the
    /// intended production behavior.
    BestEffortSilent,

    /// Collect whatever completed and report every failing source with its
    /// error alongside the partial result. The recommended default.
    BestEffortReported,
}

/// Compose an [`AggregationResult`] from settled outcomes.
///
/// Titles are concatenated in source submission order regardless of the order
/// in which tasks settled, so aggregation is deterministic given
/// deterministic per-source outcomes. Cancelled tasks count as failed.
pub(crate) fn compose(policy: Policy, mut outcomes: Vec<TaskOutcome>) -> AggregationResult {
    outcomes.sort_by_key(|outcome| outcome.index);

    let mut result = AggregationResult::default();

    for outcome in outcomes {
        match outcome.state {
            TaskState::Completed => {
                result.succeeded_count += 1;
                result.titles.extend(outcome.titles);
            }
            _ => {
                result.failed_count += 1;
                if policy == Policy::BestEffortReported {
                    let error = match outcome.error {
                        Some(error) => error.to_string(),
                        None => "fetch cancelled before completion".to_string(),
                    };
                    result.failures.push(SourceFailure {
                        source: outcome.source,
                        error,
                    });
                }
            }
        }
    }

    result
}
