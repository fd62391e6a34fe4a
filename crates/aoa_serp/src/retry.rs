use std::thread;
use std::time::Duration;

use aoa_core::error::AppError;
use serde_json::Value;

use crate::search::{SearchApi, SearchRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first.
    pub retries: u32,
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            pause: Duration::from_secs(1),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or attempts run out.
///
/// The last error is returned.
pub fn with_retry<T>(
    policy: &RetryPolicy,
    what: &str,
    mut op: impl FnMut() -> Result<T, AppError>,
) -> Result<T, AppError> {
    let attempts = policy.retries.saturating_add(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if e.retryable && attempt < attempts => {
                tracing::warn!(what, attempt, error = %e, "search call failed; retrying");
                if !policy.pause.is_zero() {
                    thread::sleep(policy.pause);
                }
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// [`SearchApi`] decorator applying a [`RetryPolicy`] to both calls.
#[derive(Debug, Clone)]
pub struct RetryingSearch<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: SearchApi> RetryingSearch<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SearchApi> SearchApi for RetryingSearch<S> {
    fn search(&self, request: &SearchRequest) -> Result<Value, AppError> {
        with_retry(&self.policy, "search", || self.inner.search(request))
    }

    fn ai_overview_detail(&self, page_token: &str, no_cache: bool) -> Result<Value, AppError> {
        with_retry(&self.policy, "ai_overview_detail", || {
            self.inner.ai_overview_detail(page_token, no_cache)
        })
    }
}
