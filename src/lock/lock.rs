use std::time::Duration;

use super::{LockError, LockState, Result};

/// Trait for a lock whose held state is observable and whose acquisition can
/// be attempted without blocking or with a deadline.
///
/// Holding is not tied to a guard or a thread: any caller may `unlock` a held
/// lock. Unlocking a lock that is not held is an error.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self);

    /// Try to acquire the lock without blocking.
    /// Returns `true` if acquired, `false` if already held.
    fn try_lock(&self) -> bool;

    /// Whether the lock is currently held. Never changes the state.
    fn is_locked(&self) -> bool;

    /// Release the lock. Fails with `LockError::NotLocked` if it is not held.
    fn unlock(&self) -> Result<()>;

    /// Acquire the lock, waiting at most `timeout`.
    /// Fails with `LockError::TimedOut` once the deadline passes.
    fn lock_timeout(&self, timeout: Duration) -> Result<()>;

    /// Acquire the lock or fail immediately with `LockError::WouldBlock`.
    fn lock_or_fail(&self) -> Result<()> {
        if self.try_lock() {
            Ok(())
        } else {
            Err(LockError::WouldBlock { name: None })
        }
    }

    /// Snapshot of `is_locked` as a `LockState`.
    fn state(&self) -> LockState {
        LockState::from(self.is_locked())
    }
}
