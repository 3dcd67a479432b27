//! Host Concurrency Facility
//!
//! The single entry point through which the portable layer reaches the host's
//! threads, locks, semaphores and clock.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::sync::{HostMutex, HostSemaphore};
use crate::thread::{HostThread, SpawnRequest, ThreadEntry, ThreadId};
use crate::time::MonotonicClock;

/// Host concurrency/timer facility.
///
/// Every object returned here is owned by the caller; the facility keeps no
/// reference to it after returning.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::{HostFacility, SpawnRequest};
///
/// fn start_worker(host: &dyn HostFacility) -> bridge_traits::error::Result<()> {
///     let request = SpawnRequest::new(host.default_priority()).with_name("worker");
///     let thread = host.spawn(request, Box::new(|| 0))?;
///     assert_eq!(thread.join()?, 0);
///     Ok(())
/// }
/// ```
pub trait HostFacility: Send + Sync {
    /// Short host name used in diagnostics
    fn name(&self) -> &str;

    /// Monotonic clock the tick counter reads
    fn clock(&self) -> Arc<dyn MonotonicClock>;

    /// Create an unlocked, non-recursive mutex
    fn create_mutex(&self) -> Result<Box<dyn HostMutex>>;

    /// Create a counting semaphore holding `initial` of at most `limit` units
    fn create_semaphore(&self, initial: u32, limit: u32) -> Result<Box<dyn HostSemaphore>>;

    /// Start a thread running `entry` immediately
    fn spawn(&self, request: SpawnRequest, entry: ThreadEntry) -> Result<Box<dyn HostThread>>;

    /// Identity of the calling thread
    fn current_thread(&self) -> ThreadId;

    /// Suspend the calling thread for at least `duration`
    fn sleep(&self, duration: Duration);

    /// Offer the rest of the time slice to other threads (may return at once)
    fn yield_now(&self);

    /// Valid values on the native priority scale
    fn priority_range(&self) -> RangeInclusive<i32>;

    /// Native priority used when a requested level cannot be mapped
    fn default_priority(&self) -> i32;
}
