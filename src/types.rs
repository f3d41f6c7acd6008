//! Core types for rss-fanout

use serde::{Deserialize, Serialize};

/// Identifier for one remote feed to fetch headlines from.
///
/// Opaque to the aggregation core: typically a URL, but nothing in the
/// orchestration logic inspects it. Callers supply sources as an ordered
/// sequence; that order is preserved in the aggregated output.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(pub String);

impl Source {
    /// Create a new Source
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Source {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Source {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Required by thiserror: fields named `source` (e.g. `Error::Cancelled`)
// are inferred as the error's source and must implement `std::error::Error`.
impl std::error::Error for Source {}

/// Lifecycle state of a single fetch task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Created but not yet admitted by the worker pool
    Pending,
    /// Fetcher call in progress
    Running,
    /// Fetcher call returned a result
    Completed,
    /// Fetcher call raised an error
    Failed,
    /// Cancellation observed before completion
    Cancelled,
}

impl TaskState {
    /// Whether this state is terminal. A task settles exactly once; no
    /// transition out of a terminal state is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled
        )
    }
}

/// One failed source and the reason it failed, as reported under
/// [`Policy::BestEffortReported`](crate::policy::Policy::BestEffortReported).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    /// The source that failed
    pub source: Source,

    /// Human-readable failure cause
    pub error: String,
}

/// Combined output of one aggregate call.
///
/// A fail-fast abort never produces an `AggregationResult`; it surfaces as an
/// [`Error`](crate::error::Error) carrying the triggering failure instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// All successfully fetched titles, concatenated in source submission
    /// order. Fetch concurrency never reorders this sequence.
    pub titles: Vec<String>,

    /// Number of sources whose fetch completed
    pub succeeded_count: usize,

    /// Number of sources whose fetch failed or was cancelled
    pub failed_count: usize,

    /// Per-source failure details. Populated only under
    /// [`Policy::BestEffortReported`](crate::policy::Policy::BestEffortReported);
    /// empty under the other policies even when `failed_count` is non-zero.
    pub failures: Vec<SourceFailure>,
}

/// Event emitted during the aggregation lifecycle
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fetch task was admitted by the worker pool and started its fetch
    FetchStarted {
        /// The source being fetched
        source: Source,
    },

    /// A fetch task reached a terminal state
    FetchSettled {
        /// The source that settled
        source: Source,
        /// The terminal state (Completed, Failed, or Cancelled)
        state: TaskState,
    },

    /// An aggregate call produced a result
    AggregationComplete {
        /// Number of sources that completed
        succeeded: usize,
        /// Number of sources that failed or were cancelled
        failed: usize,
    },
}
