//! # Host Bridge Traits
//!
//! Host abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the portable concurrency layer and
//! the host's native threading/timer facility. The layer above never touches a
//! native API directly: every thread, lock, semaphore and clock reading goes
//! through these traits.
//!
//! ## Traits
//!
//! ### Concurrency
//! - [`HostFacility`](host::HostFacility) - Factory for every host object, plus sleep/yield
//! - [`HostMutex`](sync::HostMutex) - Non-recursive mutual exclusion
//! - [`HostSemaphore`](sync::HostSemaphore) - Bounded counting semaphore with timed acquire
//! - [`HostThread`](thread::HostThread) - Joinable thread handle
//!
//! ### Utilities
//! - [`MonotonicClock`](time::MonotonicClock) - Elapsed time source for the tick counter
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Host     | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | RTOS     | TBD                 | 📋 Planned |
//!
//! ## Error Handling
//!
//! Construction paths use [`BridgeError`](error::BridgeError). Bounded waits
//! report a timeout as `false`, never as an error.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` (thread handles only `Send`) so
//! host objects can be shared across the runtime's threads.

pub mod error;
pub mod host;
pub mod sync;
pub mod thread;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use host::HostFacility;
pub use sync::{Delay, HostMutex, HostSemaphore, Timeout, DELAY_IMMEDIATE, DELAY_INFINITE};
pub use thread::{HostThread, SpawnRequest, ThreadEntry, ThreadId, ThreadReturn};
pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink, MonotonicClock};
