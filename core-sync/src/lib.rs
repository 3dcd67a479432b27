//! # Concurrency Primitives Module
//!
//! Caller-facing concurrency primitives of the portable layer.
//!
//! ## Overview
//!
//! Every primitive is an opaque, single-owner handle wrapping an object
//! obtained from a [`HostFacility`](bridge_traits::HostFacility). The layer
//! forwards to the host and keeps no state of its own between calls: no
//! reference counting, no misuse checks, no internal buffering.
//!
//! ## Components
//!
//! - **Mutex** (`mutex`): non-recursive lock with explicit enter/exit
//! - **Semaphore** (`semaphore`): bounded counting semaphore, the only timed wait
//! - **Thread** (`thread`): spawn/join with a captured return value
//! - **Priority** (`priority`): abstract levels and the host translation table
//!
//! ## Example
//!
//! ```ignore
//! use core_sync::{Mutex, Semaphore};
//!
//! let mutex = Mutex::init(&host)?;
//! mutex.enter();
//! mutex.exit();
//!
//! let sem = Semaphore::init(&host, 0, 1)?;
//! assert!(!sem.wait(0));
//! ```

pub mod error;
pub mod mutex;
pub mod priority;
pub mod semaphore;
pub mod thread;

pub use error::{Result, SyncError};
pub use mutex::Mutex;
pub use priority::{Priority, PriorityTable};
pub use semaphore::Semaphore;
pub use thread::{Thread, ThreadOptions};
