use std::time::Duration;

/// Error type for lock operations.
///
/// Each variant carries the name of the mutex it came from, when the mutex
/// was constructed with one, so messages stay attributable in logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    /// `unlock` was called on a mutex that is not held.
    #[error("{}unlock of unlocked mutex", prefix(.name))]
    NotLocked { name: Option<String> },
    /// A non-blocking acquisition found the mutex already held.
    #[error("{}unable to acquire mutex lock", prefix(.name))]
    WouldBlock { name: Option<String> },
    /// A bounded acquisition did not succeed before its deadline.
    #[error("{}unable to acquire mutex lock after {timeout:?}", prefix(.name))]
    TimedOut {
        name: Option<String>,
        timeout: Duration,
    },
}

impl LockError {
    /// The name of the mutex that produced this error, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            LockError::NotLocked { name }
            | LockError::WouldBlock { name }
            | LockError::TimedOut { name, .. } => name.as_deref(),
        }
    }

    /// Whether this is a `TimedOut` error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LockError::TimedOut { .. })
    }

    /// The requested timeout for `TimedOut`, `None` for every other variant.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            LockError::TimedOut { timeout, .. } => Some(*timeout),
            _ => None,
        }
    }
}

fn prefix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("mutex {}: ", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, LockError>;
