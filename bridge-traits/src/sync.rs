//! Mutual Exclusion and Counting Semaphore Abstractions
//!
//! Host-side objects backing the caller-facing `Mutex` and `Semaphore`
//! handles. Implementations own the native object; dropping the boxed trait
//! object releases it.

use std::time::Duration;

/// Delay expressed in milliseconds.
pub type Delay = u32;

/// Delay value meaning "try once, never block".
pub const DELAY_IMMEDIATE: Delay = 0;

/// Delay value meaning "block until the operation succeeds".
pub const DELAY_INFINITE: Delay = Delay::MAX;

/// How long a bounded wait may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeout {
    /// Try once, never suspend the caller
    Immediate,
    /// Block for at most this many milliseconds
    Millis(u32),
    /// Block until the operation succeeds
    Infinite,
}

impl Timeout {
    /// Converts a raw delay, honouring the `0` and `DELAY_INFINITE` sentinels.
    pub fn from_delay(delay: Delay) -> Self {
        match delay {
            DELAY_IMMEDIATE => Self::Immediate,
            DELAY_INFINITE => Self::Infinite,
            ms => Self::Millis(ms),
        }
    }

    /// Maximum blocking duration, `None` when unbounded.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Immediate => Some(Duration::ZERO),
            Self::Millis(ms) => Some(Duration::from_millis(u64::from(*ms))),
            Self::Infinite => None,
        }
    }
}

impl From<Delay> for Timeout {
    fn from(delay: Delay) -> Self {
        Self::from_delay(delay)
    }
}

/// Host mutual-exclusion object.
///
/// Non-recursive: a second `lock` from the holder blocks forever. Calling
/// `unlock` without holding the lock is caller error; its effect is whatever
/// the host defines.
pub trait HostMutex: Send + Sync {
    /// Block until the lock is free, then take it
    fn lock(&self);

    /// Take the lock if it is free, without blocking
    fn try_lock(&self) -> bool;

    /// Release the lock
    fn unlock(&self);
}

/// Host counting semaphore with a fixed upper bound.
pub trait HostSemaphore: Send + Sync {
    /// Decrement the count, blocking up to `timeout` while it is zero.
    ///
    /// Returns `true` when the count was decremented.
    fn acquire(&self, timeout: Timeout) -> bool;

    /// Decrement the count if it is positive, without any suspension logic.
    fn try_acquire(&self) -> bool;

    /// Increment the count, saturating at `limit()`.
    fn release(&self);

    /// Currently available count
    fn available(&self) -> u32;

    /// Upper bound fixed at creation
    fn limit(&self) -> u32;
}
