//! # Semaphore Primitive
//!
//! Counting semaphore with an upper bound fixed at creation. It is the only
//! bounded-wait primitive in the layer and doubles as a timed mutex.
//!
//! The `_immediate` variants exist for call sites that run in a strictly
//! non-blocking context; they touch the count exactly like their plain
//! counterparts but skip any suspension logic.

use bridge_traits::{Delay, HostFacility, HostSemaphore, Timeout};
use std::fmt;
use tracing::trace;

use crate::error::{Result, SyncError};

/// Opaque semaphore handle.
pub struct Semaphore {
    inner: Box<dyn HostSemaphore>,
}

impl Semaphore {
    /// Creates a semaphore holding `initial` units out of at most `limit`.
    ///
    /// Fails with [`SyncError::InvalidSemaphoreBounds`] when `initial > limit`.
    /// A zero limit is accepted; such a semaphore never has a unit to give.
    pub fn init(host: &dyn HostFacility, initial: u32, limit: u32) -> Result<Self> {
        if initial > limit {
            return Err(SyncError::InvalidSemaphoreBounds { initial, limit });
        }

        let inner = host.create_semaphore(initial, limit)?;
        trace!(host = host.name(), initial, limit, "semaphore created");
        Ok(Self { inner })
    }

    /// Takes one unit, blocking up to `delay` milliseconds while none is
    /// available.
    ///
    /// `0` tries once without blocking; [`DELAY_INFINITE`](bridge_traits::DELAY_INFINITE)
    /// blocks until a unit arrives. Returns `false` on timeout, in which case
    /// the count is untouched.
    pub fn wait(&self, delay: Delay) -> bool {
        self.inner.acquire(Timeout::from_delay(delay))
    }

    /// Same as `wait(0)`, without any suspension logic.
    pub fn wait_immediate(&self) -> bool {
        self.inner.try_acquire()
    }

    /// Adds one unit; saturates silently at the limit.
    pub fn signal(&self) {
        self.inner.release();
    }

    /// Same as [`signal`](Semaphore::signal), for non-blocking call sites.
    pub fn signal_immediate(&self) {
        self.inner.release();
    }

    /// Units currently available
    pub fn available(&self) -> u32 {
        self.inner.available()
    }

    /// Upper bound fixed at creation
    pub fn limit(&self) -> u32 {
        self.inner.limit()
    }

    /// Releases the host resources.
    pub fn destroy(self) {
        trace!("semaphore destroyed");
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semaphore")
            .field("available", &self.available())
            .field("limit", &self.limit())
            .finish()
    }
}
