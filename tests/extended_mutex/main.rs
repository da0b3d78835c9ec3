//! ExtendedMutex integration tests.
//!
//! Covers the operation surface from the outside of the crate:
//! - Single-owner state transitions and status checks
//! - Fail-fast and deadline-bounded acquisition
//! - Mutual exclusion under concurrent contenders

mod contention;
