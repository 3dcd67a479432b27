//! # Thread Primitive
//!
//! Spawns host threads that run an entry function and capture its
//! [`ThreadReturn`] value.
//!
//! Threads start running as soon as they are created. [`Thread::join`]
//! consumes the handle, so a result can be collected at most once.
//!
//! ## Forced termination
//!
//! [`Thread::terminate`] is best-effort only. No host this layer targets can
//! stop another thread safely, so the handle is detached: the body keeps
//! running until its entry function returns, its result is discarded, and any
//! lock it holds stays held until then. Do not rely on it for clean shutdown.

use bridge_traits::{HostFacility, HostThread, SpawnRequest, ThreadId, ThreadReturn};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{Result, SyncError};
use crate::priority::{Priority, PriorityTable};

/// Creation parameters for a [`Thread`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadOptions {
    /// Thread name shown in host diagnostics
    pub name: Option<String>,
    /// Requested minimum stack size in bytes; `0` uses the host default.
    /// Advisory: hosts without stack control ignore it.
    pub stack_hint: usize,
    /// Abstract priority, translated through a [`PriorityTable`]
    pub priority: Priority,
}

impl ThreadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stack_hint(mut self, stack_hint: usize) -> Self {
        self.stack_hint = stack_hint;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Opaque handle to a thread created through this layer.
pub struct Thread {
    inner: Box<dyn HostThread>,
    priority: Priority,
}

impl Thread {
    /// Spawns a thread running `entry_fn(entry_arg)`.
    pub fn create<A, F>(
        host: &dyn HostFacility,
        priorities: &PriorityTable,
        options: ThreadOptions,
        entry_fn: F,
        entry_arg: A,
    ) -> Result<Self>
    where
        A: Send + 'static,
        F: FnOnce(A) -> ThreadReturn + Send + 'static,
    {
        Self::spawn(host, priorities, options, move || entry_fn(entry_arg))
    }

    /// Spawns a thread running the closure `body`.
    pub fn spawn<F>(
        host: &dyn HostFacility,
        priorities: &PriorityTable,
        options: ThreadOptions,
        body: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> ThreadReturn + Send + 'static,
    {
        let native_priority = priorities.resolve(options.priority, host);

        let mut request = SpawnRequest::new(native_priority).with_stack_size(options.stack_hint);
        if let Some(name) = options.name {
            request = request.with_name(name);
        }

        let inner = host.spawn(request, Box::new(body))?;
        debug!(
            thread_id = inner.id().as_raw(),
            priority = ?options.priority,
            native_priority,
            stack_hint = options.stack_hint,
            "thread created"
        );

        Ok(Self {
            inner,
            priority: options.priority,
        })
    }

    /// Identity of the calling thread. The caller does not own it.
    pub fn current(host: &dyn HostFacility) -> ThreadId {
        host.current_thread()
    }

    /// Identity of this thread
    pub fn id(&self) -> ThreadId {
        self.inner.id()
    }

    /// Abstract priority requested at creation
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Native priority the host was asked for
    pub fn native_priority(&self) -> i32 {
        self.inner.native_priority()
    }

    /// Blocks until the entry function returns and yields its value.
    pub fn join(self) -> Result<ThreadReturn> {
        let thread_id = self.inner.id();
        let value = self.inner.join().map_err(|e| SyncError::ThreadJoin {
            thread_id,
            reason: e.to_string(),
        })?;
        debug!(thread_id = thread_id.as_raw(), value, "thread joined");
        Ok(value)
    }

    /// Best-effort forced stop; see the module docs for what this does not
    /// guarantee.
    pub fn terminate(self) {
        warn!(
            thread_id = self.inner.id().as_raw(),
            "terminating thread: handle detached, body runs to completion unobserved"
        );
        self.inner.detach();
    }
}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.id())
            .field("priority", &self.priority)
            .field("native_priority", &self.native_priority())
            .finish()
    }
}
