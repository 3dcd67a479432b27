//! Mutex and Semaphore Implementations
//!
//! Both objects are a `parking_lot` lock guarding a small state word plus a
//! condvar for blocked callers. Neither poisons, so a panicking holder never
//! wedges unrelated threads behind a `PoisonError`.

use bridge_traits::sync::{HostMutex, HostSemaphore, Timeout};
use parking_lot::{Condvar, Mutex};
use std::time::Instant;
use tracing::{trace, warn};

/// Non-recursive mutex with explicit `lock`/`unlock` calls.
///
/// Unlike a guard-based mutex, ownership is not tied to a scope: the holder
/// releases it with a separate `unlock` call, possibly from another function.
#[derive(Debug, Default)]
pub struct DesktopMutex {
    held: Mutex<bool>,
    released: Condvar,
}

impl DesktopMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some thread currently holds the lock
    pub fn is_locked(&self) -> bool {
        *self.held.lock()
    }
}

impl HostMutex for DesktopMutex {
    fn lock(&self) {
        let mut held = self.held.lock();
        while *held {
            self.released.wait(&mut held);
        }
        *held = true;
    }

    fn try_lock(&self) -> bool {
        let mut held = self.held.lock();
        if *held {
            false
        } else {
            *held = true;
            true
        }
    }

    fn unlock(&self) {
        let mut held = self.held.lock();
        if !*held {
            warn!("unlock called on a mutex that is not held");
            return;
        }
        *held = false;
        drop(held);
        self.released.notify_one();
    }
}

/// Counting semaphore bounded by a fixed limit.
#[derive(Debug)]
pub struct CondvarSemaphore {
    count: Mutex<u32>,
    limit: u32,
    posted: Condvar,
}

impl CondvarSemaphore {
    /// Creates a semaphore holding `initial` units, clamped to `limit`.
    pub fn new(initial: u32, limit: u32) -> Self {
        Self {
            count: Mutex::new(initial.min(limit)),
            limit,
            posted: Condvar::new(),
        }
    }
}

impl HostSemaphore for CondvarSemaphore {
    fn acquire(&self, timeout: Timeout) -> bool {
        let mut count = self.count.lock();

        match timeout.as_duration() {
            None => {
                while *count == 0 {
                    self.posted.wait(&mut count);
                }
            }
            Some(duration) if duration.is_zero() => {
                if *count == 0 {
                    return false;
                }
            }
            Some(duration) => {
                let deadline = Instant::now() + duration;
                while *count == 0 {
                    if self.posted.wait_until(&mut count, deadline).timed_out() && *count == 0 {
                        trace!(
                            timeout_ms = duration.as_millis() as u64,
                            "semaphore wait timed out"
                        );
                        return false;
                    }
                }
            }
        }

        *count -= 1;
        true
    }

    fn try_acquire(&self) -> bool {
        let mut count = self.count.lock();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    fn release(&self) {
        let mut count = self.count.lock();
        if *count >= self.limit {
            trace!(limit = self.limit, "semaphore signal saturated at limit");
            return;
        }
        *count += 1;
        drop(count);
        self.posted.notify_one();
    }

    fn available(&self) -> u32 {
        *self.count.lock()
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_mutex_lock_unlock() {
        let mutex = DesktopMutex::new();
        assert!(!mutex.is_locked());

        mutex.lock();
        assert!(mutex.is_locked());
        assert!(!mutex.try_lock());

        mutex.unlock();
        assert!(!mutex.is_locked());
        assert!(mutex.try_lock());
        mutex.unlock();
    }

    #[test]
    fn test_mutex_unmatched_unlock_is_ignored() {
        let mutex = DesktopMutex::new();
        mutex.unlock();
        assert!(!mutex.is_locked());
        assert!(mutex.try_lock());
        mutex.unlock();
    }

    #[test]
    fn test_mutex_unlock_from_other_thread_wakes_waiter() {
        let mutex = Arc::new(DesktopMutex::new());
        mutex.lock();

        let waiter = {
            let mutex = Arc::clone(&mutex);
            thread::spawn(move || {
                mutex.lock();
                mutex.unlock();
            })
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        mutex.unlock();
        waiter.join().unwrap();
        assert!(!mutex.is_locked());
    }

    #[test]
    fn test_semaphore_initial_clamped_to_limit() {
        let sem = CondvarSemaphore::new(5, 2);
        assert_eq!(sem.available(), 2);
        assert_eq!(sem.limit(), 2);
    }

    #[test]
    fn test_semaphore_release_saturates() {
        let sem = CondvarSemaphore::new(1, 1);
        sem.release();
        sem.release();
        assert_eq!(sem.available(), 1);
    }

    #[test]
    fn test_semaphore_immediate_acquire_on_empty() {
        let sem = CondvarSemaphore::new(0, 3);
        assert!(!sem.acquire(Timeout::Immediate));
        assert!(!sem.try_acquire());
        assert_eq!(sem.available(), 0);
    }

    #[test]
    fn test_semaphore_timed_acquire_expires() {
        let sem = CondvarSemaphore::new(0, 1);
        let start = Instant::now();
        assert!(!sem.acquire(Timeout::Millis(30)));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_semaphore_infinite_acquire_woken_by_release() {
        let sem = Arc::new(CondvarSemaphore::new(0, 1));

        let waiter = {
            let sem = Arc::clone(&sem);
            thread::spawn(move || sem.acquire(Timeout::Infinite))
        };

        thread::sleep(Duration::from_millis(20));
        sem.release();

        assert!(waiter.join().unwrap());
        assert_eq!(sem.available(), 0);
    }
}
