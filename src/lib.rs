//! # rss-fanout
//!
//! Concurrent headline aggregation for RSS/Atom feeds.
//!
//! ## Design Philosophy
//!
//! rss-fanout is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Policy-explicit** - How fetch failures affect the result is chosen by
//!   the caller per call, never defaulted implicitly
//! - **Structured** - Every fetch task is owned by the aggregate call that
//!   spawned it; nothing outlives the call
//! - **Event-driven** - Consumers can subscribe to lifecycle events
//!
//! ## Quick Start
//!
//! ```no_run
//! use rss_fanout::{Config, HeadlineAggregator, Policy, Source};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let aggregator = HeadlineAggregator::new(Config::default())?;
//!
//!     let sources = [
//!         Source::from("https://www.npr.org/rss/rss.php?id=1001"),
//!         Source::from("http://rss.cnn.com/rss/cnn_topstories.rss"),
//!         Source::from("http://feeds.foxnews.com/foxnews/politics?format=xml"),
//!     ];
//!
//!     let result = aggregator
//!         .aggregate(&sources, Policy::BestEffortReported)
//!         .await?;
//!     println!(
//!         "Found {} headlines ({} feeds failed)",
//!         result.titles.len(),
//!         result.failed_count
//!     );
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Aggregation orchestrator
pub mod aggregator;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Feed fetching boundary
pub mod fetcher;
/// Completion policies
pub mod policy;
/// Worker pool
pub mod pool;
/// Core types and events
pub mod types;

mod task;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use aggregator::HeadlineAggregator;
pub use config::Config;
pub use error::{Error, FetchError, Result};
pub use fetcher::{HeadlineFetcher, HttpHeadlineFetcher};
pub use policy::Policy;
pub use pool::WorkerPool;
pub use types::{AggregationResult, Event, Source, SourceFailure, TaskState};
