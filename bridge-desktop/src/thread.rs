//! Thread Implementation
//!
//! Threads are plain `std::thread`s. Identity is a process-unique counter
//! stored in a thread-local: spawned threads receive theirs from the parent
//! before they start, any other thread (main, foreign) gets one lazily on its
//! first query.

use bridge_traits::{
    error::{BridgeError, Result},
    thread::{HostThread, SpawnRequest, ThreadEntry, ThreadId, ThreadReturn},
};
use std::any::Any;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace};

use crate::host::DESKTOP_DEFAULT_PRIORITY;

/// Global thread ID counter. Zero is reserved for "not yet assigned".
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT_ID: Cell<u64> = const { Cell::new(0) };
}

fn allocate_id() -> u64 {
    NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of the calling thread, assigning one on first use.
pub(crate) fn current_id() -> ThreadId {
    CURRENT_ID.with(|current| {
        if current.get() == 0 {
            current.set(allocate_id());
        }
        ThreadId::from_raw(current.get())
    })
}

/// A `std::thread` started through [`DesktopHost`](crate::DesktopHost).
#[derive(Debug)]
pub struct DesktopThread {
    id: ThreadId,
    native_priority: i32,
    handle: JoinHandle<ThreadReturn>,
}

impl DesktopThread {
    pub(crate) fn spawn(request: SpawnRequest, entry: ThreadEntry) -> Result<Self> {
        if let Some(name) = &request.name {
            if name.contains('\0') {
                return Err(BridgeError::InvalidArgument(format!(
                    "thread name {:?} contains a NUL byte",
                    name
                )));
            }
        }

        let raw_id = allocate_id();
        let native_priority = request.native_priority;

        let mut builder = thread::Builder::new();
        if let Some(name) = request.name.clone() {
            builder = builder.name(name);
        }
        if request.stack_size > 0 {
            builder = builder.stack_size(request.stack_size);
        }

        let handle = builder.spawn(move || {
            CURRENT_ID.with(|current| current.set(raw_id));
            apply_native_priority(raw_id, native_priority);
            entry()
        })?;

        debug!(
            thread_id = raw_id,
            native_priority,
            stack_size = request.stack_size,
            "spawned desktop thread"
        );

        Ok(Self {
            id: ThreadId::from_raw(raw_id),
            native_priority: request.native_priority,
            handle,
        })
    }
}

impl HostThread for DesktopThread {
    fn id(&self) -> ThreadId {
        self.id
    }

    fn native_priority(&self) -> i32 {
        self.native_priority
    }

    fn join(self: Box<Self>) -> Result<ThreadReturn> {
        let id = self.id;
        trace!(thread_id = id.as_raw(), "joining desktop thread");
        self.handle.join().map_err(|payload| {
            BridgeError::OperationFailed(format!(
                "{} panicked: {}",
                id,
                panic_message(payload.as_ref())
            ))
        })
    }

    fn detach(self: Box<Self>) {
        trace!(thread_id = self.id.as_raw(), "detaching desktop thread");
        drop(self.handle);
    }
}

/// Nice value for a native priority: the default level maps to 0 and each
/// step up or down moves the nice value by 5.
pub(crate) fn nice_for_priority(native_priority: i32) -> i32 {
    ((DESKTOP_DEFAULT_PRIORITY - native_priority).saturating_mul(5)).clamp(-20, 19)
}

/// Applies the translated priority to the calling thread.
///
/// Linux schedules threads individually, so the nice value of the thread id
/// is set. Raising priority needs `CAP_SYS_NICE`; without it the thread keeps
/// the inherited value and the failure is logged.
#[cfg(target_os = "linux")]
fn apply_native_priority(thread_id: u64, native_priority: i32) {
    let nice = nice_for_priority(native_priority);
    if nice == 0 {
        return;
    }

    // SAFETY: gettid and setpriority have no memory-safety preconditions.
    let rc = unsafe {
        let tid = libc::syscall(libc::SYS_gettid) as libc::id_t;
        libc::setpriority(libc::PRIO_PROCESS, tid, nice)
    };
    if rc != 0 {
        debug!(
            thread_id,
            native_priority,
            nice,
            error = %std::io::Error::last_os_error(),
            "could not apply thread priority, keeping inherited value"
        );
    }
}

/// Other desktop platforms keep the inherited priority.
#[cfg(not(target_os = "linux"))]
fn apply_native_priority(thread_id: u64, native_priority: i32) {
    trace!(thread_id, native_priority, "thread priority not applied on this platform");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_spawn_and_join_returns_value() {
        let thread = DesktopThread::spawn(SpawnRequest::new(3), Box::new(|| 42)).unwrap();
        assert_eq!(Box::new(thread).join().unwrap(), 42);
    }

    #[test]
    fn test_spawned_thread_sees_its_own_id() {
        let (tx, rx) = mpsc::channel();
        let thread = DesktopThread::spawn(
            SpawnRequest::new(3),
            Box::new(move || {
                tx.send(current_id()).unwrap();
                0
            }),
        )
        .unwrap();

        let id = thread.id();
        Box::new(thread).join().unwrap();
        assert_eq!(rx.recv().unwrap(), id);
        assert_ne!(id, current_id());
    }

    #[test]
    fn test_current_id_is_stable() {
        assert_eq!(current_id(), current_id());
    }

    #[test]
    fn test_thread_name_and_stack_size() {
        let request = SpawnRequest::new(3)
            .with_name("gos-test-worker")
            .with_stack_size(256 * 1024);
        let thread = DesktopThread::spawn(
            request,
            Box::new(|| {
                let name = thread::current().name().map(str::to_owned);
                (name.as_deref() == Some("gos-test-worker")) as ThreadReturn
            }),
        )
        .unwrap();

        assert_eq!(Box::new(thread).join().unwrap(), 1);
    }

    #[test]
    fn test_nul_in_name_is_invalid_argument() {
        let request = SpawnRequest::new(3).with_name("bad\0name");
        let err = DesktopThread::spawn(request, Box::new(|| 0)).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }

    #[test]
    fn test_nice_mapping() {
        assert_eq!(nice_for_priority(DESKTOP_DEFAULT_PRIORITY), 0);
        assert_eq!(nice_for_priority(0), 15);
        assert_eq!(nice_for_priority(1), 10);
        assert_eq!(nice_for_priority(6), -15);
        assert_eq!(nice_for_priority(-100), 19);
        assert_eq!(nice_for_priority(100), -20);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_low_priority_is_applied_to_thread() {
        let thread = DesktopThread::spawn(
            SpawnRequest::new(1),
            Box::new(|| {
                // SAFETY: plain syscalls on the calling thread.
                unsafe {
                    let tid = libc::syscall(libc::SYS_gettid) as libc::id_t;
                    libc::getpriority(libc::PRIO_PROCESS, tid) as ThreadReturn
                }
            }),
        )
        .unwrap();

        // Lowering priority never needs privileges; a process already niced
        // above 10 keeps its higher value.
        assert!(Box::new(thread).join().unwrap() >= 10);
    }

    #[test]
    fn test_panicking_thread_reports_error() {
        let thread = DesktopThread::spawn(
            SpawnRequest::new(3),
            Box::new(|| -> ThreadReturn { panic!("boom") }),
        )
        .unwrap();
        let err = Box::new(thread).join().unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
