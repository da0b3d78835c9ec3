use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, error, trace, warn};

use super::{Lock, LockError, LockState, Result};

/// A mutex whose held state can be inspected and whose acquisition can be
/// attempted without blocking or against a deadline.
///
/// The held flag lives behind an inner `Mutex<bool>` that is only held long
/// enough to test-and-set it, never across the caller's critical section.
/// Waiters park on a `Condvar` that `unlock` notifies.
///
/// Holding is not tied to a thread or a guard, so any caller may `unlock`.
/// There is no reentrancy and no fairness among waiters. Share an instance by
/// reference or through an `Arc`; it is intentionally not `Clone`.
///
/// ```
/// use std::time::Duration;
/// use sourced_mutex::ExtendedMutex;
///
/// let mutex = ExtendedMutex::named("orders");
/// assert!(mutex.try_lock());
/// assert!(mutex.is_locked());
/// assert!(mutex.lock_timeout(Duration::from_millis(1)).is_err());
/// mutex.unlock().unwrap();
/// assert!(mutex.unlock().is_err());
/// ```
#[derive(Debug)]
pub struct ExtendedMutex {
    state: Mutex<bool>,
    wake: Condvar,
    name: Option<String>,
}

impl ExtendedMutex {
    pub fn new() -> Self {
        ExtendedMutex {
            state: Mutex::new(false),
            wake: Condvar::new(),
            name: None,
        }
    }

    /// Create an unlocked mutex with a name used in log records and errors.
    pub fn named(name: impl Into<String>) -> Self {
        ExtendedMutex {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Acquire the mutex, blocking until it becomes available.
    pub fn lock(&self) {
        let mut locked = self
            .wake
            .wait_while(self.flag(), |locked| *locked)
            .unwrap_or_else(PoisonError::into_inner);
        *locked = true;
        trace!("mutex {} acquired", self.label());
    }

    /// Acquire the mutex if it is not held. Never blocks on the held state.
    pub fn try_lock(&self) -> bool {
        if self.acquire() {
            trace!("mutex {} acquired", self.label());
            true
        } else {
            debug!("mutex {} already held", self.label());
            false
        }
    }

    /// Whether the mutex is held right now. The answer may be stale as soon
    /// as it is returned; use `try_lock` to check and acquire in one step.
    pub fn is_locked(&self) -> bool {
        *self.flag()
    }

    pub fn state(&self) -> LockState {
        LockState::from(self.is_locked())
    }

    /// Release the mutex and wake one waiter.
    ///
    /// Unlocking a mutex that is not held is a caller bug and returns
    /// `LockError::NotLocked` without touching the state.
    pub fn unlock(&self) -> Result<()> {
        let mut locked = self.flag();
        if !*locked {
            drop(locked);
            error!("mutex {}: unlock of unlocked mutex", self.label());
            return Err(LockError::NotLocked {
                name: self.name.clone(),
            });
        }
        *locked = false;
        self.wake.notify_one();
        drop(locked);
        trace!("mutex {} released", self.label());
        Ok(())
    }

    /// Acquire the mutex or fail with `LockError::WouldBlock` if it is held.
    pub fn lock_or_fail(&self) -> Result<()> {
        if self.try_lock() {
            Ok(())
        } else {
            Err(LockError::WouldBlock {
                name: self.name.clone(),
            })
        }
    }

    /// Acquire the mutex, waiting at most `timeout` for it to be released.
    ///
    /// The wait and the deadline are decided under the inner lock: either
    /// this call sets the held flag and returns `Ok`, or it returns
    /// `LockError::TimedOut` and leaves the flag alone for good.
    pub fn lock_timeout(&self, timeout: Duration) -> Result<()> {
        let (mut locked, _) = self
            .wake
            .wait_timeout_while(self.flag(), timeout, |locked| *locked)
            .unwrap_or_else(PoisonError::into_inner);
        if *locked {
            drop(locked);
            warn!(
                "mutex {}: unable to acquire lock after {:?}",
                self.label(),
                timeout
            );
            return Err(self.timed_out(timeout));
        }
        *locked = true;
        drop(locked);
        trace!("mutex {} acquired", self.label());
        Ok(())
    }

    /// Test-and-set without logging.
    pub(crate) fn acquire(&self) -> bool {
        let mut locked = self.flag();
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    pub(crate) fn timed_out(&self, timeout: Duration) -> LockError {
        LockError::TimedOut {
            name: self.name.clone(),
            timeout,
        }
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    // Critical sections on the flag never panic, so a poisoned inner lock
    // still guards a valid bool.
    fn flag(&self) -> MutexGuard<'_, bool> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ExtendedMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for ExtendedMutex {
    fn lock(&self) {
        ExtendedMutex::lock(self)
    }

    fn try_lock(&self) -> bool {
        ExtendedMutex::try_lock(self)
    }

    fn is_locked(&self) -> bool {
        ExtendedMutex::is_locked(self)
    }

    fn unlock(&self) -> Result<()> {
        ExtendedMutex::unlock(self)
    }

    fn lock_timeout(&self, timeout: Duration) -> Result<()> {
        ExtendedMutex::lock_timeout(self, timeout)
    }

    fn lock_or_fail(&self) -> Result<()> {
        ExtendedMutex::lock_or_fail(self)
    }
}
