//! Workspace placeholder crate.
//!
//! This crate exposes the shared feature flags that map to the individual
//! workspace crates (`core-runtime`, `core-sync`, `bridge-traits`). Graphics
//! runtimes can depend on `gos-workspace` and enable the documented features
//! without wiring each crate individually.
//!
//! - `desktop-shims` (default): use `bridge-desktop` as the host facility when
//!   none is injected through [`OsalConfig`].

pub use bridge_traits::{Delay, ThreadId, ThreadReturn, Timeout, DELAY_IMMEDIATE, DELAY_INFINITE};
pub use core_runtime::{global, heap, logging, Error, Osal, OsalConfig, Ticks};
pub use core_sync::{Mutex, Priority, PriorityTable, Semaphore, Thread, ThreadOptions};
