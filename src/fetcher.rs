//! Feed fetching — the external collaborator boundary.
//!
//! The aggregation core treats fetching as a black box behind the
//! [`HeadlineFetcher`] trait: given a source, produce an ordered list of item
//! titles or fail. [`HttpHeadlineFetcher`] is the production implementation,
//! fetching over HTTP and parsing RSS 2.0 with an Atom fallback. No retries
//! are performed here or anywhere in the core.

use crate::config::Config;
use crate::error::{Error, FetchError, Result};
use crate::types::Source;

/// Abstraction over headline fetching, enabling testability.
#[async_trait::async_trait]
pub trait HeadlineFetcher: Send + Sync {
    /// Fetch the ordered sequence of item titles for one source.
    async fn fetch_titles(
        &self,
        source: &Source,
    ) -> std::result::Result<Vec<String>, FetchError>;
}

/// Production [`HeadlineFetcher`] backed by an HTTP client.
pub struct HttpHeadlineFetcher {
    client: reqwest::Client,
}

impl HttpHeadlineFetcher {
    /// Create a fetcher with timeout and User-Agent from `config`.
    ///
    /// # Errors
    /// Returns [`Error::Http`] if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HeadlineFetcher for HttpHeadlineFetcher {
    async fn fetch_titles(
        &self,
        source: &Source,
    ) -> std::result::Result<Vec<String>, FetchError> {
        tracing::debug!(source = %source, "fetching feed");

        let response = self.client.get(source.as_str()).send().await?;

        // Check HTTP status before trying to parse the response body
        let response = response.error_for_status()?;

        let content = response.text().await?;

        parse_titles(&content)
    }
}

/// Extract item titles from a feed document.
///
/// Tries RSS 2.0 first, then falls back to Atom. Items without a title are
/// skipped rather than failing the whole document.
fn parse_titles(content: &str) -> std::result::Result<Vec<String>, FetchError> {
    match rss::Channel::read_from(content.as_bytes()) {
        Ok(channel) => Ok(channel
            .items()
            .iter()
            .filter_map(|item| item.title().map(str::to_string))
            .collect()),
        Err(rss_error) => match atom_syndication::Feed::read_from(content.as_bytes()) {
            Ok(feed) => Ok(feed
                .entries()
                .iter()
                .map(|entry| entry.title().as_str().to_string())
                .collect()),
            Err(atom_error) => Err(FetchError::Parse(format!(
                "not RSS ({rss_error}) or Atom ({atom_error})"
            ))),
        },
    }
}
