//! Deadline-bounded acquisition for async callers.
//!
//! A polling future retries `try_lock` and is raced against the deadline with
//! `tokio::time::timeout`. When the deadline wins the polling future is
//! dropped, so it can never acquire the mutex after the caller has been told
//! the attempt failed.

use std::time::Duration;

use log::{trace, warn};
use serde::{Deserialize, Deserializer};

use super::{ExtendedMutex, Result};

/// Options for [`ExtendedMutex::lock_async_with`].
///
/// Deserializable so it can sit inside application config, with both
/// durations given in whole milliseconds:
///
/// ```toml
/// [orders_lock]
/// timeout_ms = 250
/// poll_interval_ms = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AsyncLockOptions {
    /// How long to keep trying before failing with `LockError::TimedOut`.
    #[serde(rename = "timeout_ms", deserialize_with = "millis")]
    pub timeout: Duration,
    /// Pause between acquisition attempts.
    #[serde(rename = "poll_interval_ms", deserialize_with = "millis")]
    pub poll_interval: Duration,
}

impl AsyncLockOptions {
    pub fn new(timeout: Duration) -> Self {
        AsyncLockOptions {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Interval between attempts; never shorter than one millisecond.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval.max(MIN_POLL_INTERVAL)
    }
}

impl Default for AsyncLockOptions {
    fn default() -> Self {
        AsyncLockOptions {
            timeout: Duration::from_secs(1),
            poll_interval: MIN_POLL_INTERVAL,
        }
    }
}

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

fn millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

impl ExtendedMutex {
    /// Acquire the mutex, waiting at most `timeout`, without blocking the
    /// executor thread. Requires a tokio runtime with the time driver.
    pub async fn lock_timeout_async(&self, timeout: Duration) -> Result<()> {
        self.poll_lock(timeout, MIN_POLL_INTERVAL).await
    }

    pub async fn lock_async_with(&self, options: &AsyncLockOptions) -> Result<()> {
        self.poll_lock(options.timeout, options.poll_interval()).await
    }

    async fn poll_lock(&self, timeout: Duration, poll_interval: Duration) -> Result<()> {
        let attempt = async {
            while !self.acquire() {
                tokio::time::sleep(poll_interval).await;
            }
        };

        match tokio::time::timeout(timeout, attempt).await {
            Ok(()) => {
                trace!("mutex {} acquired", self.label());
                Ok(())
            }
            Err(_) => {
                warn!(
                    "mutex {}: unable to acquire lock after {:?}",
                    self.label(),
                    timeout
                );
                Err(self.timed_out(timeout))
            }
        }
    }
}
