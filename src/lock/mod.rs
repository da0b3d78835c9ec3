#[cfg(feature = "tokio")]
mod async_lock;
mod error;
mod extended;
mod lock;
mod state;

#[cfg(feature = "tokio")]
pub use async_lock::AsyncLockOptions;
pub use error::{LockError, Result};
pub use extended::ExtendedMutex;
pub use lock::Lock;
pub use state::LockState;
