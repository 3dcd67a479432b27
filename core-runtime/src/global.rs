//! Process-wide [`Osal`] instance for code that cannot thread a context
//! through its call graph.
//!
//! The instance lives until the process exits; there is no global deinit.

use crate::config::OsalConfig;
use crate::error::{Error, Result};
use crate::osal::Osal;
use std::sync::OnceLock;

static GLOBAL_OSAL: OnceLock<Osal> = OnceLock::new();

/// Initializes the process-wide context and returns it.
///
/// Fails with [`Error::AlreadyInitialized`] on every call after the first
/// successful one.
pub fn init(config: OsalConfig) -> Result<&'static Osal> {
    if GLOBAL_OSAL.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }

    let osal = Osal::init(config)?;
    GLOBAL_OSAL.set(osal).map_err(|_| Error::AlreadyInitialized)?;
    get()
}

/// The process-wide context, or [`Error::NotInitialized`].
pub fn get() -> Result<&'static Osal> {
    GLOBAL_OSAL.get().ok_or(Error::NotInitialized)
}

pub fn try_get() -> Option<&'static Osal> {
    GLOBAL_OSAL.get()
}
