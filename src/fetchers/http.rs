use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::errors::FetchError;
use crate::fetchers::SubtitleFetcher;

/// Direct-text subtitle fetcher over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// HTTP client for making requests
    client: Client,
    /// Per-request timeout
    timeout: Duration,
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        HttpFetcher {
            client: Client::new(),
            timeout,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching subtitle text from {}", parsed);
        let response = self
            .client
            .get(parsed)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::SourceError {
                status_code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))
    }
}
