//! Test doubles shared across unit tests.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::FetchError;
use crate::fetcher::HeadlineFetcher;
use crate::types::Source;

/// Scripted outcome for one source.
#[derive(Clone)]
struct Script {
    delay: Option<Duration>,
    outcome: Result<Vec<String>, FetchError>,
}

/// Deterministic [`HeadlineFetcher`] with scripted per-source outcomes.
///
/// Instruments every call with an in-flight gauge (for concurrency-ceiling
/// assertions) and records which fetches ran to completion (a fetch dropped
/// by cancellation mid-delay never registers as finished).
#[derive(Default)]
pub(crate) struct StubFetcher {
    scripts: HashMap<String, Script>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    finished: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a successful fetch returning `titles`.
    pub(crate) fn titles(mut self, source: &str, titles: &[&str]) -> Self {
        self.scripts.insert(
            source.to_string(),
            Script {
                delay: None,
                outcome: Ok(titles.iter().map(|t| t.to_string()).collect()),
            },
        );
        self
    }

    /// Script a network failure with `message`.
    pub(crate) fn fails(mut self, source: &str, message: &str) -> Self {
        self.scripts.insert(
            source.to_string(),
            Script {
                delay: None,
                outcome: Err(FetchError::Network(message.to_string())),
            },
        );
        self
    }

    /// Add an artificial delay before the scripted outcome for `source`.
    pub(crate) fn delayed(mut self, source: &str, delay: Duration) -> Self {
        let script = self
            .scripts
            .get_mut(source)
            .expect("delayed() requires an existing script for the source");
        script.delay = Some(delay);
        self
    }

    /// Highest number of fetches observed executing simultaneously.
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Sources whose fetch ran to completion (successfully or not).
    pub(crate) fn finished_sources(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HeadlineFetcher for StubFetcher {
    async fn fetch_titles(
        &self,
        source: &Source,
    ) -> std::result::Result<Vec<String>, FetchError> {
        let _gauge = Gauge::enter(&self.in_flight, &self.max_in_flight);

        let script = self
            .scripts
            .get(source.as_str())
            .cloned()
            .unwrap_or_else(|| Script {
                delay: None,
                outcome: Err(FetchError::Network(format!(
                    "no scripted outcome for {source}"
                ))),
            });

        if let Some(delay) = script.delay {
            tokio::time::sleep(delay).await;
        }

        self.finished.lock().unwrap().push(source.to_string());
        script.outcome
    }
}

/// RAII gauge over concurrent fetcher invocations.
struct Gauge<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> Gauge<'a> {
    fn enter(in_flight: &'a AtomicUsize, max_in_flight: &'a AtomicUsize) -> Self {
        let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        max_in_flight.fetch_max(current, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for Gauge<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
