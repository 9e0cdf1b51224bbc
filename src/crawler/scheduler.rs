//! Scheduler for request politeness
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - Respecting a minimum delay between request starts
//! - Retrying transient failures, one permit per attempt
//!
//! Every fetch the crawler makes, including the index page, goes through
//! [`Scheduler::fetch`].

use crate::config::Config;
use crate::crawler::fetcher::{retry_with_backoff, Fetch};
use crate::FetchError;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore, SemaphorePermit};

/// Scheduler gates outgoing requests
///
/// The scheduler coordinates:
/// - Global concurrency limits (max concurrent requests)
/// - Pacing (minimum time between two request starts)
/// - Bounded retries with exponential backoff
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    semaphore: Semaphore,

    /// Start time of the most recent request
    last_request: Mutex<Option<Instant>>,

    /// Minimum spacing between request starts
    min_delay: Duration,

    /// Additional attempts after a transient failure
    max_retries: u32,

    /// Base delay for exponential backoff (milliseconds)
    backoff_base_ms: u64,
}

impl Scheduler {
    /// Creates a new scheduler that does not retry
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Maximum number of requests in flight
    /// * `min_delay` - Minimum time between two request starts
    pub fn new(max_concurrent: usize, min_delay: Duration) -> Self {
        Self {
            semaphore: Semaphore::new(max_concurrent.max(1)),
            last_request: Mutex::new(None),
            min_delay,
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    /// Sets the retry budget used by [`Scheduler::fetch`]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Creates a scheduler from the crawler and fetcher configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.crawler.max_concurrent_requests as usize,
            Duration::from_millis(config.crawler.request_delay_ms),
        )
        .with_retries(config.fetcher.max_retries, config.fetcher.backoff_base_ms)
    }

    /// Fetches `url` under the politeness rules
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | Success | Return body |
    /// | HTTP 5xx, 429 | Retry up to `max_retries` times with backoff |
    /// | Timeout, connection error | Retry up to `max_retries` times with backoff |
    /// | Other HTTP status | Fail immediately |
    ///
    /// Each attempt acquires its own permit and is paced like any other
    /// request. The permit is released before the backoff sleep.
    pub async fn fetch<F: Fetch>(&self, fetcher: &F, url: &str) -> Result<String, FetchError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || async move {
            let _permit = self.acquire().await;
            fetcher.fetch(url).await
        })
        .await
    }

    /// Waits until a request may start
    ///
    /// This method:
    /// 1. Acquires a global semaphore permit
    /// 2. Sleeps until at least `min_delay` has passed since the previous start
    /// 3. Records the new start time and returns the permit
    ///
    /// The request should hold the returned permit until it completes. The
    /// semaphore is never closed, so the permit is only absent in theory.
    pub async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        let permit = self.semaphore.acquire().await.ok();

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                let wait = self.min_delay - elapsed;
                tracing::trace!("Pacing request for {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());

        permit
    }

    #[cfg(test)]
    fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}
