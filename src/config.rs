//! Configuration types for rss-fanout

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Aggregator configuration
///
/// All fields have serde defaults, so a partial document (or
/// [`Config::default()`]) works out of the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum concurrent fetches across the worker pool (default: 2)
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Per-request fetch timeout in seconds (default: 30)
    ///
    /// Applied by the HTTP fetcher; the orchestrator itself has no timeout
    /// and waits until every task is terminal or cancelled.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with feed requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Config {
    /// Fetch timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent_fetches(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_concurrent_fetches() -> usize {
    2
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "rss-fanout headline reader".to_string()
}
