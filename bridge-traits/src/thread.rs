//! Thread Abstractions
//!
//! Host-side thread handle plus the identity and result types shared by every
//! host implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Value produced by a thread's entry function (pointer-sized).
pub type ThreadReturn = isize;

/// Boxed entry point handed to the host for execution on the new thread.
pub type ThreadEntry = Box<dyn FnOnce() -> ThreadReturn + Send + 'static>;

/// Opaque thread identity.
///
/// Two ids compare equal exactly when they name the same host thread. The
/// numeric value carries no meaning beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadId(u64);

impl ThreadId {
    /// Wraps a host-assigned identifier.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Host-assigned identifier
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread#{}", self.0)
    }
}

/// Parameters for spawning a host thread.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnRequest {
    /// Optional thread name, for diagnostics
    pub name: Option<String>,
    /// Requested minimum stack size in bytes; `0` means host default
    pub stack_size: usize,
    /// Priority on the host's native scale, already translated
    pub native_priority: i32,
}

impl SpawnRequest {
    pub fn new(native_priority: i32) -> Self {
        Self {
            name: None,
            stack_size: 0,
            native_priority,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }
}

/// A running (or finished) host thread.
///
/// Both `join` and `detach` consume the handle, so a thread can be waited on
/// at most once.
pub trait HostThread: Send {
    /// Identity of the thread this handle refers to
    fn id(&self) -> ThreadId;

    /// Native priority requested for the thread.
    ///
    /// Hosts that cannot apply priorities (or lack the privilege to raise
    /// one) still report the requested value here, so treat it as advisory.
    fn native_priority(&self) -> i32;

    /// Block until the entry function returns and hand back its result.
    fn join(self: Box<Self>) -> Result<ThreadReturn>;

    /// Give up the handle without waiting; the thread keeps running until its
    /// entry function returns and the result is discarded.
    fn detach(self: Box<Self>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_identity() {
        let a = ThreadId::from_raw(3);
        let b = ThreadId::from_raw(3);
        let c = ThreadId::from_raw(4);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_raw(), 3);
        assert_eq!(a.to_string(), "thread#3");
    }

    #[test]
    fn test_spawn_request_builder() {
        let request = SpawnRequest::new(4)
            .with_name("gos-input")
            .with_stack_size(64 * 1024);

        assert_eq!(request.native_priority, 4);
        assert_eq!(request.name.as_deref(), Some("gos-input"));
        assert_eq!(request.stack_size, 65536);
    }
}
