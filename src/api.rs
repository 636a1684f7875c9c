//! HTTP JSON fetching with exponential backoff retry logic.
//!
//! This module provides the interface the pipeline uses to talk to the RVO
//! Open Data API. It includes automatic retry logic with exponential backoff
//! and jitter to handle transient failures gracefully.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchJson`]: Core trait defining an async JSON fetch
//! - [`HttpJson`]: Implements the trait over a shared `reqwest` client
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchJson` implementation
//!
//! # Retry Strategy
//!
//! - Bounded number of retry attempts ([`RetryPolicy::max_retries`])
//! - Exponential backoff starting at the base delay
//! - Delay capped at a maximum
//! - Random jitter (0-250ms) added to prevent thundering herd

use rand::{Rng, rng};
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// Trait for fetching a JSON body from a URL.
///
/// Implementors take a URL and return the parsed JSON body. This abstraction
/// allows decorators (like retry logic) and fake fetchers in tests.
pub trait FetchJson {
    /// Fetch the given URL and parse the response body as JSON.
    ///
    /// A non-2xx status is an error, not a value.
    async fn fetch(&self, url: &str) -> Result<Value, Box<dyn Error>>;
}

/// Explicit retry policy injected into the fetch call.
///
/// The delay before the n-th retry follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts before giving up.
    pub max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    pub base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    pub max_delay: StdDuration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: StdDuration::from_secs(1),
            max_delay: StdDuration::from_secs(30),
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchJson`]
/// implementation.
///
/// This decorator transparently retries transient failures: rate limiting,
/// network issues, and temporary server errors.
pub struct RetryFetch<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T> RetryFetch<T>
where
    T: FetchJson,
{
    /// Wrap an existing [`FetchJson`] implementation with the given policy.
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<T> FetchJson for RetryFetch<T>
where
    T: FetchJson,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<Value, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => {
                    return Ok(body);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.policy.max_retries {
                        error!(
                            attempt,
                            max = self.policy.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.policy.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.policy.max_delay {
                        delay = self.policy.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.policy.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// [`FetchJson`] implementation over a shared `reqwest` client.
#[derive(Debug)]
pub struct HttpJson<'a> {
    /// The shared HTTP client, carrying the request timeout.
    pub client: &'a reqwest::Client,
}

impl<'a> FetchJson for HttpJson<'a> {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<Value, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = self.client.get(url).send().await?.error_for_status();
        let dt = t0.elapsed();

        match res {
            Ok(response) => {
                let body = response.json::<Value>().await?;
                Ok(body)
            }
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "HTTP request failed");
                Err(Box::new(e))
            }
        }
    }
}
