use thiserror::Error;

use crate::server::FeedPage;

/// Errors that can reach the feed loader from one page fetch.
///
/// Any of these halts the current load cycle: the loader surfaces an inline
/// indicator and returns to idle so a later trigger can retry. There is no
/// automatic retry or backoff.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body was not a valid feed page payload
    #[error("Malformed feed payload: {0}")]
    Decode(String),
}

/// Client for the feed API.
///
/// Thin wrapper over a shared `reqwest::Client`; cheap to clone into spawned
/// load tasks.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch one feed page.
    ///
    /// There is no timeout on this request: a request that never resolves
    /// leaves the loader in its loading state for the rest of the session.
    pub async fn fetch_page(&self, page: u32) -> Result<FeedPage, FeedError> {
        let url = format!("{}/api/videos?page={}", self.base_url, page);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        response
            .json::<FeedPage>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))
    }
}
