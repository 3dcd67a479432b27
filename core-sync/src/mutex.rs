//! # Mutex Primitive
//!
//! Caller-owned handle over a host mutual-exclusion object.
//!
//! ```text
//! init() ──▶ Unlocked ⇄ enter()/exit() ⇄ Locked ──▶ destroy()
//! ```
//!
//! The mutex is non-recursive and offers no timed variant; bounded waits go
//! through [`Semaphore`](crate::Semaphore) instead.

use bridge_traits::{HostFacility, HostMutex};
use std::fmt;
use tracing::trace;

use crate::error::Result;

/// Opaque mutex handle.
///
/// The handle owns the host object. Dropping it (or calling
/// [`destroy`](Mutex::destroy)) releases the host resources.
pub struct Mutex {
    inner: Box<dyn HostMutex>,
}

impl Mutex {
    /// Creates an unlocked mutex on `host`, ready for immediate use.
    pub fn init(host: &dyn HostFacility) -> Result<Self> {
        let inner = host.create_mutex()?;
        trace!(host = host.name(), "mutex created");
        Ok(Self { inner })
    }

    /// Blocks until the mutex is free, then takes it.
    ///
    /// Re-entering from the thread that already holds it blocks forever.
    pub fn enter(&self) {
        self.inner.lock();
    }

    /// Takes the mutex if it is free, without blocking.
    pub fn try_enter(&self) -> bool {
        self.inner.try_lock()
    }

    /// Releases the mutex. Calling this without holding it is caller error.
    pub fn exit(&self) {
        self.inner.unlock();
    }

    /// Releases the host resources.
    pub fn destroy(self) {
        trace!("mutex destroyed");
    }
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex").finish_non_exhaustive()
    }
}
