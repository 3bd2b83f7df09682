//! HTTP access to the static object store
//!
//! One GET per dataset with a per-request timeout. Transient failures
//! (timeouts, connection errors, 429 and 5xx) are retried with exponential
//! backoff up to the configured limit.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::{Error, Result};

/// Bounded retry schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each one after
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::constants::DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(crate::constants::DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// No retries at all
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }

    /// Run `operation` until it succeeds, fails permanently, or retries run out
    pub async fn run<T, F, Fut>(&self, what: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.backoff(retry);
                    warn!(
                        "Fetching {} failed ({}); retry {}/{} in {:?}",
                        what, e, retry, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Client for one object store
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpSource {
    /// Create a source for `base_url`
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Create a source from the network settings of `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            config.retry_policy(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a dataset path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a dataset as text; any non-2xx status is an error
    ///
    /// # Errors
    /// * Returns `Error::HttpStatus` for a non-success response
    /// * Returns `Error::Transport` if the request or body read fails
    pub async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path);
        let url = url.as_str();
        self.retry.run(url, || self.get_once(url)).await
    }

    /// GET a dataset as text; a non-2xx status yields `None`
    ///
    /// # Errors
    /// * Returns `Error::Transport` if the request or body read fails
    pub async fn fetch_optional_text(&self, path: &str) -> Result<Option<String>> {
        match self.fetch_text(path).await {
            Ok(text) => Ok(Some(text)),
            Err(Error::HttpStatus { url, status }) => {
                warn!("{} answered {}; treating as no data", url, status);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_once(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(url, format!("Request failed: {}", e), Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| Error::transport(url, format!("Failed to read body: {}", e), Some(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let source = HttpSource::new(
            "https://store.example.org",
            Duration::from_secs(5),
            RetryPolicy::none(),
        )
        .unwrap();

        assert_eq!(source.base_url(), "https://store.example.org/");
        assert_eq!(
            source.url_for("/model/db/data.csv"),
            "https://store.example.org/model/db/data.csv"
        );
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
        };

        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let policy = RetryPolicy {
            max_retries: 2,
            initial_backoff: Duration::from_millis(1),
        };
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result = policy
            .run("test", || async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(Error::http_status("u", 503))
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let policy = RetryPolicy {
            max_retries: 1,
            initial_backoff: Duration::from_millis(1),
        };
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result: Result<()> = policy
            .run("test", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::http_status("u", 500))
            })
            .await;

        assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1),
        };
        let attempts = AtomicU32::new(0);
        let counter = &attempts;

        let result: Result<()> = policy
            .run("test", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::http_status("u", 404))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
