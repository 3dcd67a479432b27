//! # Desktop Bridge Implementations
//!
//! Default host facility for desktop platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate implements every bridge trait using desktop-appropriate
//! libraries:
//! - `HostMutex` and `HostSemaphore` using `parking_lot` locks and condvars
//! - `HostThread` using `std::thread::Builder` (stack hint honoured)
//! - `MonotonicClock` using `std::time::Instant`
//!
//! Translated priorities are applied as per-thread nice values on Linux
//! (lowering always works, raising needs `CAP_SYS_NICE`). Other platforms
//! only record them on the thread handle.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::DesktopHost;
//! use bridge_traits::HostFacility;
//!
//! let host = DesktopHost::new();
//! let mutex = host.create_mutex()?;
//! mutex.lock();
//! mutex.unlock();
//! ```

mod clock;
mod host;
mod sync;
mod thread;

pub use clock::InstantClock;
pub use host::{DesktopHost, DESKTOP_DEFAULT_PRIORITY, DESKTOP_PRIORITY_RANGE};
pub use sync::{CondvarSemaphore, DesktopMutex};
pub use thread::DesktopThread;
