//! # Core Runtime
//!
//! Process context for the portable layer: configuration, the tick clock, the
//! global system lock, primitive factories, the heap shim and logging set-up.
//!
//! ## Modules
//!
//! - [`config`] - `OsalConfig` builder with fail-fast validation
//! - [`osal`] - The `Osal` context and its lifecycle
//! - [`global`] - Optional process-wide `Osal` instance
//! - [`clock`] - Millisecond tick counter
//! - [`heap`] - C allocator shim
//! - [`logging`] - `tracing-subscriber` set-up and host sink forwarding

pub mod clock;
pub mod config;
pub mod error;
pub mod global;
pub mod heap;
pub mod logging;
pub mod osal;

pub use clock::{TickClock, Ticks};
pub use config::{OsalConfig, OsalConfigBuilder, PostInitHook};
pub use error::{Error, Result};
pub use osal::Osal;
