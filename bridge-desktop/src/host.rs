//! Desktop Host Facility

use bridge_traits::{
    error::Result,
    host::HostFacility,
    sync::{HostMutex, HostSemaphore},
    thread::{HostThread, SpawnRequest, ThreadEntry, ThreadId},
    time::MonotonicClock,
};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::clock::InstantClock;
use crate::sync::{CondvarSemaphore, DesktopMutex};
use crate::thread::{current_id, DesktopThread};

/// Native priority scale: idle (0) through time-critical (6).
pub const DESKTOP_PRIORITY_RANGE: RangeInclusive<i32> = 0..=6;

/// Native priority used when a level cannot be mapped.
pub const DESKTOP_DEFAULT_PRIORITY: i32 = 3;

/// Host facility backed by the Rust standard library and `parking_lot`.
#[derive(Debug, Clone)]
pub struct DesktopHost {
    clock: Arc<InstantClock>,
}

impl DesktopHost {
    /// Create a desktop host whose clock origin is "now".
    pub fn new() -> Self {
        Self {
            clock: Arc::new(InstantClock::new()),
        }
    }
}

impl Default for DesktopHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFacility for DesktopHost {
    fn name(&self) -> &str {
        "desktop"
    }

    fn clock(&self) -> Arc<dyn MonotonicClock> {
        self.clock.clone()
    }

    fn create_mutex(&self) -> Result<Box<dyn HostMutex>> {
        Ok(Box::new(DesktopMutex::new()))
    }

    fn create_semaphore(&self, initial: u32, limit: u32) -> Result<Box<dyn HostSemaphore>> {
        Ok(Box::new(CondvarSemaphore::new(initial, limit)))
    }

    fn spawn(&self, request: SpawnRequest, entry: ThreadEntry) -> Result<Box<dyn HostThread>> {
        Ok(Box::new(DesktopThread::spawn(request, entry)?))
    }

    fn current_thread(&self) -> ThreadId {
        current_id()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }

    fn yield_now(&self) {
        thread::yield_now();
    }

    fn priority_range(&self) -> RangeInclusive<i32> {
        DESKTOP_PRIORITY_RANGE
    }

    fn default_priority(&self) -> i32 {
        DESKTOP_DEFAULT_PRIORITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_reports_priority_scale() {
        let host = DesktopHost::new();
        assert_eq!(host.name(), "desktop");
        assert!(host.priority_range().contains(&host.default_priority()));
    }

    #[test]
    fn test_host_objects_are_independent() {
        let host = DesktopHost::new();
        let first = host.create_mutex().unwrap();
        let second = host.create_mutex().unwrap();

        first.lock();
        assert!(second.try_lock());
        second.unlock();
        first.unlock();
    }

    #[test]
    fn test_host_spawn_round_trip() {
        let host = DesktopHost::new();
        let thread = host
            .spawn(SpawnRequest::new(DESKTOP_DEFAULT_PRIORITY), Box::new(|| -1))
            .unwrap();
        assert_eq!(thread.native_priority(), DESKTOP_DEFAULT_PRIORITY);
        assert_eq!(thread.join().unwrap(), -1);
    }

    #[test]
    fn test_host_sleep_is_bounded_below() {
        let host = DesktopHost::new();
        let clock = host.clock();
        let before = clock.now();
        host.sleep(Duration::from_millis(10));
        assert!(clock.now() - before >= Duration::from_millis(10));
        host.yield_now();
    }
}
