//! Error types for rss-fanout
//!
//! Two layers mirror the system's boundary: [`FetchError`] is produced by the
//! fetcher collaborator and stored verbatim on a failed task; [`Error`] is the
//! crate-level type surfaced by [`aggregate`](crate::HeadlineAggregator::aggregate).
//! Which per-task errors reach the caller is entirely policy-dependent: see
//! [`Policy`](crate::policy::Policy).

use thiserror::Error;

use crate::types::Source;

/// Result type alias for rss-fanout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rss-fanout
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A source's fetch failed; under fail-fast this carries the triggering
    /// error for the whole aggregate call
    #[error("fetch failed for {source}: {error}")]
    SourceFailed {
        /// The source whose fetch failed
        source: Source,
        /// The stored fetch error
        #[source]
        error: FetchError,
    },

    /// A task was cancelled before it settled
    #[error("fetch cancelled for {source}")]
    Cancelled {
        /// The source whose fetch was cancelled
        source: Source,
    },

    /// Shutdown in progress - the worker pool is no longer admitting fetches
    #[error("shutdown in progress: worker pool is closed")]
    ShuttingDown,

    /// Aggregate called with an empty source list
    #[error("no sources supplied")]
    NoSources,

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Error produced by a [`HeadlineFetcher`](crate::fetcher::HeadlineFetcher) call
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure, timeout, or non-success HTTP status
    #[error("network error: {0}")]
    Network(String),

    /// The document was retrieved but is not a parseable feed
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Network(error.to_string())
    }
}
