/*!
 * Mock fetcher for testing subtitle loading behavior.
 *
 * Supports a few behavior modes:
 * - `MockFetcher::working()` - serves canned payloads by URL
 * - `MockFetcher::failing()` - always fails the request
 * - `MockFetcher::slow(delay_ms)` - serves payloads after a delay
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::fetchers::SubtitleFetcher;

/// Behavior mode for the mock fetcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFetchBehavior {
    /// Serves registered payloads
    Working,
    /// Always fails with a request error
    Failing,
    /// Serves registered payloads after a delay (for supersede testing)
    Slow { delay_ms: u64 },
}

/// Mock fetcher serving in-memory payloads
#[derive(Debug)]
pub struct MockFetcher {
    /// Behavior mode
    behavior: MockFetchBehavior,
    /// Canned payloads by URL
    payloads: HashMap<String, String>,
    /// Number of fetch calls observed
    request_count: AtomicUsize,
}

impl MockFetcher {
    pub fn new(behavior: MockFetchBehavior) -> Self {
        MockFetcher {
            behavior,
            payloads: HashMap::new(),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Create a working mock fetcher
    pub fn working() -> Self {
        Self::new(MockFetchBehavior::Working)
    }

    /// Create a mock fetcher that always fails
    pub fn failing() -> Self {
        Self::new(MockFetchBehavior::Failing)
    }

    /// Create a mock fetcher that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockFetchBehavior::Slow { delay_ms })
    }

    /// Register a canned payload for a URL
    pub fn with_payload(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.payloads.insert(url.into(), content.into());
        self
    }

    /// Number of fetch calls made against this fetcher
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn lookup(&self, url: &str) -> Result<String, FetchError> {
        self.payloads.get(url).cloned().ok_or_else(|| FetchError::SourceError {
            status_code: 404,
            message: "Not Found".to_string(),
        })
    }
}

#[async_trait]
impl SubtitleFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockFetchBehavior::Working => self.lookup(url),
            MockFetchBehavior::Failing => Err(FetchError::RequestFailed(
                "Mock fetcher configured to fail".to_string(),
            )),
            MockFetchBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                self.lookup(url)
            }
        }
    }
}
