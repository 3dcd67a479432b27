//! # Runtime Configuration Module
//!
//! Provides configuration for the portable runtime context.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct an
//! `OsalConfig` holding the host facility and the settings every primitive
//! factory needs. It enforces fail-fast validation so a bad priority table or
//! stack size is rejected before any thread exists.
//!
//! ## Required Dependencies
//!
//! - `HostFacility` - Native threads, locks, semaphores and the clock
//!
//! When the `desktop-shims` feature is enabled, `DesktopHost` is injected
//! automatically if no host is provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::OsalConfig;
//! use core_sync::Priority;
//!
//! let config = OsalConfig::builder()
//!     .priority_table_json(r#"{"Low": 1, "Normal": 3, "High": 5}"#)
//!     .default_stack_size(256 * 1024)
//!     .thread_name_prefix("gos")
//!     .on_post_init(|osal| {
//!         tracing::info!(ticks = osal.system_ticks(), "subsystems ready");
//!         Ok(())
//!     })
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use crate::osal::Osal;
use bridge_traits::HostFacility;
use core_sync::PriorityTable;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Smallest non-zero stack size accepted for new threads (16 KiB).
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Largest stack size accepted for new threads (256 MiB).
pub const MAX_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Hook executed once by [`Osal::post_init`].
pub type PostInitHook = Arc<dyn Fn(&Osal) -> Result<()> + Send + Sync>;

/// Configuration for the runtime context.
///
/// Use [`OsalConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct OsalConfig {
    /// Native host facility backing every primitive
    pub host: Arc<dyn HostFacility>,

    /// Abstract-to-native priority mapping
    pub priority_table: PriorityTable,

    /// Stack size applied when a thread asks for the host default (`0` keeps
    /// the host default)
    pub default_stack_size: usize,

    /// Prefix for threads created without an explicit name
    pub thread_name_prefix: Option<String>,

    /// Hooks run once, in order, by [`Osal::post_init`]
    pub post_init_hooks: Vec<PostInitHook>,
}

impl fmt::Debug for OsalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsalConfig")
            .field("host", &self.host.name())
            .field("priority_table", &self.priority_table)
            .field("default_stack_size", &self.default_stack_size)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("post_init_hooks", &self.post_init_hooks.len())
            .finish()
    }
}

impl OsalConfig {
    /// Creates a new builder for constructing an `OsalConfig`.
    pub fn builder() -> OsalConfigBuilder {
        OsalConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Stack size is 0 or within [`MIN_STACK_SIZE`]..=[`MAX_STACK_SIZE`]
    /// - Thread name prefix is not blank
    ///
    /// Mapped priorities outside the host's native range are not an error;
    /// they resolve to the host default and are reported at warn level.
    pub fn validate(&self) -> Result<()> {
        if self.default_stack_size != 0
            && !(MIN_STACK_SIZE..=MAX_STACK_SIZE).contains(&self.default_stack_size)
        {
            return Err(Error::Config(format!(
                "Default stack size {} is outside {}..={} bytes. \
                 Use 0 to keep the host default.",
                self.default_stack_size, MIN_STACK_SIZE, MAX_STACK_SIZE
            )));
        }

        if let Some(prefix) = &self.thread_name_prefix {
            if prefix.trim().is_empty() {
                return Err(Error::Config("Thread name prefix cannot be blank".to_string()));
            }
        }

        let range = self.host.priority_range();
        for (priority, native) in self.priority_table.iter() {
            if !range.contains(&native) {
                warn!(
                    ?priority,
                    native,
                    host = self.host.name(),
                    "mapped priority outside host range; host default will be used"
                );
            }
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn host_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HostFacility".to_string(),
        message: "A HostFacility implementation is required for threads, locks and the tick clock. \
                 Desktop: enable the 'desktop-shims' feature to use the default DesktopHost. \
                 Embedded: inject the RTOS-backed host with .host()."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_host() -> Result<Arc<dyn HostFacility>> {
    use bridge_desktop::DesktopHost;

    let host: Arc<dyn HostFacility> = Arc::new(DesktopHost::new());
    Ok(host)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_host() -> Result<Arc<dyn HostFacility>> {
    Err(host_missing_error())
}

/// Builder for constructing [`OsalConfig`] instances.
#[derive(Default)]
pub struct OsalConfigBuilder {
    host: Option<Arc<dyn HostFacility>>,
    priority_table: Option<PriorityTable>,
    priority_table_json: Option<String>,
    default_stack_size: Option<usize>,
    thread_name_prefix: Option<String>,
    post_init_hooks: Vec<PostInitHook>,
}

impl OsalConfigBuilder {
    /// Sets the host facility implementation.
    pub fn host(mut self, host: Arc<dyn HostFacility>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the priority table.
    pub fn priority_table(mut self, table: PriorityTable) -> Self {
        self.priority_table = Some(table);
        self.priority_table_json = None;
        self
    }

    /// Sets the priority table from its JSON form, e.g.
    /// `{"Low": 1, "Normal": 3}`. Parsed during [`build`](Self::build).
    pub fn priority_table_json(mut self, json: impl Into<String>) -> Self {
        self.priority_table_json = Some(json.into());
        self.priority_table = None;
        self
    }

    /// Sets the stack size used when a thread requests the host default.
    pub fn default_stack_size(mut self, bytes: usize) -> Self {
        self.default_stack_size = Some(bytes);
        self
    }

    /// Sets the prefix for auto-named threads (`<prefix>-<n>`).
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = Some(prefix.into());
        self
    }

    /// Appends a post-init hook.
    pub fn on_post_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Osal) -> Result<()> + Send + Sync + 'static,
    {
        self.post_init_hooks.push(Arc::new(hook));
        self
    }

    /// Builds the final `OsalConfig`.
    ///
    /// Returns an error if no host is available, the priority JSON does not
    /// parse, or [`OsalConfig::validate`] fails.
    pub fn build(self) -> Result<OsalConfig> {
        let host = match self.host {
            Some(host) => host,
            None => provide_default_host()?,
        };

        let priority_table = match (self.priority_table, self.priority_table_json) {
            (Some(table), _) => table,
            (None, Some(json)) => PriorityTable::from_json(&json)
                .map_err(|e| Error::Config(format!("Invalid priority table: {}", e)))?,
            (None, None) => PriorityTable::default(),
        };

        let config = OsalConfig {
            host,
            priority_table,
            default_stack_size: self.default_stack_size.unwrap_or(0),
            thread_name_prefix: self.thread_name_prefix,
            post_init_hooks: self.post_init_hooks,
        };

        config.validate()?;

        Ok(config)
    }
}
