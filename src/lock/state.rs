use std::fmt;

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a mutex's held flag.
///
/// Like `is_locked`, the snapshot may be stale as soon as it is taken. It is
/// meant for status reporting, not for check-then-act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

impl LockState {
    pub fn is_locked(self) -> bool {
        self == LockState::Locked
    }
}

impl From<bool> for LockState {
    fn from(locked: bool) -> Self {
        if locked {
            LockState::Locked
        } else {
            LockState::Unlocked
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "unlocked"),
            LockState::Locked => write!(f, "locked"),
        }
    }
}
