//! A mutex extended with non-blocking conditional acquisition, side-effect
//! free status checks, and bounded-wait acquisition that reports failure
//! instead of blocking forever.
//!
//! ```
//! use sourced_mutex::{ExtendedMutex, LockError};
//!
//! let mutex = ExtendedMutex::new();
//! mutex.lock();
//! assert!(mutex.is_locked());
//! assert_eq!(mutex.lock_or_fail(), Err(LockError::WouldBlock { name: None }));
//! mutex.unlock()?;
//! # Ok::<(), LockError>(())
//! ```

mod lock;

#[cfg(feature = "tokio")]
pub use lock::AsyncLockOptions;
pub use lock::{ExtendedMutex, Lock, LockError, LockState, Result};
