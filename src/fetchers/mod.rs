/*!
 * Fetch capability for subtitle sources.
 *
 * The engine never performs network I/O itself; it resolves subtitle text
 * through this trait. The crate ships two implementations:
 * - `HttpFetcher`: direct text download over HTTP(S)
 * - `MockFetcher`: canned payloads and failure modes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::FetchError;

/// Capability to resolve a subtitle URL to its raw text payload.
#[async_trait]
pub trait SubtitleFetcher: Send + Sync + Debug {
    /// Fetch the raw subtitle text behind the URL.
    ///
    /// # Returns
    /// * `Result<String, FetchError>` - The payload text or a fetch error
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub mod http;
pub mod mock;
