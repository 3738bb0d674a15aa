//! Timed page retrieval.
//!
//! A retrieval is raced against a deadline timer: whichever settles first
//! wins. When the timer wins, the in-flight retrieval is dropped and its
//! eventual result discarded; transport-level cancellation is not
//! guaranteed and not required.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::types::errors::FetchError;

/// Trait defining the network collaborator: retrieve one page's markup.
#[async_trait]
pub trait PageFetcherTrait: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// Races `retrieval` against a timer of `timeout_ms`. First to settle wins;
/// the timer winning yields `FetchError::Timeout`.
pub async fn race_deadline<T, F>(retrieval: F, timeout_ms: u64) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    tokio::select! {
        outcome = retrieval => outcome,
        _ = tokio::time::sleep(Duration::from_millis(timeout_ms)) => Err(FetchError::Timeout(timeout_ms)),
    }
}

/// HTTP page fetcher with a per-request deadline.
pub struct PageFetcher {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl PageFetcher {
    /// Builds a fetcher. The client follows a bounded number of redirects
    /// and identifies itself with the given browser User-Agent; many sites
    /// serve reduced or empty metadata to unknown agents.
    pub fn new(timeout_ms: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(8))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client, timeout_ms })
    }

    /// The complete retrieval: request, status check, body read. No retries;
    /// failure propagates immediately to the caller.
    async fn retrieve(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[async_trait]
impl PageFetcherTrait for PageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        race_deadline(self.retrieve(url), self.timeout_ms).await
    }
}
