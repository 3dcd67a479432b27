//! # Runtime Context
//!
//! [`Osal`] owns everything the portable layer keeps for the lifetime of the
//! process: the host facility, the tick clock origin, the global system lock
//! and the priority table used by the thread factory.
//!
//! ## Lifecycle
//!
//! 1. [`Osal::init`] starts the tick clock and creates the system lock.
//! 2. [`Osal::post_init`] runs the configured hooks once subsystems exist.
//! 3. [`Osal::deinit`] drops the context. Threads still running are not
//!    stopped.
//!
//! ## Fatal stops
//!
//! [`Osal::halt`] and [`Osal::exit`] never return. They report at error level
//! and then park the calling thread for good; other threads keep running.

use crate::clock::{TickClock, Ticks};
use crate::config::{OsalConfig, PostInitHook};
use crate::error::Result;
use bridge_traits::{Delay, HostFacility, ThreadId, ThreadReturn};
use core_sync::{Mutex, PriorityTable, Semaphore, Thread, ThreadOptions};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span};

/// Process-wide runtime context.
pub struct Osal {
    host: Arc<dyn HostFacility>,
    ticks: TickClock,
    system_lock: Mutex,
    priorities: PriorityTable,
    default_stack_size: usize,
    thread_name_prefix: Option<String>,
    post_init_hooks: Vec<PostInitHook>,
    post_init_done: AtomicBool,
    next_thread_seq: AtomicU64,
}

impl Osal {
    /// Starts the tick clock and creates the global system lock.
    pub fn init(config: OsalConfig) -> Result<Self> {
        config.validate()?;

        let OsalConfig {
            host,
            priority_table,
            default_stack_size,
            thread_name_prefix,
            post_init_hooks,
        } = config;

        let ticks = TickClock::start(host.clock());
        let system_lock = Mutex::init(&*host)?;

        info!(
            host = host.name(),
            hooks = post_init_hooks.len(),
            default_stack_size,
            "portable layer initialized"
        );

        Ok(Self {
            host,
            ticks,
            system_lock,
            priorities: priority_table,
            default_stack_size,
            thread_name_prefix,
            post_init_hooks,
            post_init_done: AtomicBool::new(false),
            next_thread_seq: AtomicU64::new(0),
        })
    }

    /// Runs the post-init hooks in registration order.
    ///
    /// Only the first call does anything; later calls return `Ok`. If a hook
    /// fails, the remaining hooks are skipped and the error is returned.
    pub fn post_init(&self) -> Result<()> {
        if self.post_init_done.swap(true, Ordering::AcqRel) {
            debug!("post-init already ran");
            return Ok(());
        }

        let span = info_span!("post_init", hooks = self.post_init_hooks.len());
        let _entered = span.enter();

        for (index, hook) in self.post_init_hooks.iter().enumerate() {
            hook(self).map_err(|e| {
                error!(index, error = %e, "post-init hook failed");
                e
            })?;
        }

        debug!("post-init complete");
        Ok(())
    }

    /// Tears the context down. Nothing beyond dropping owned resources.
    pub fn deinit(self) {
        debug!(uptime_ticks = self.system_ticks(), "portable layer deinitialized");
    }

    /// Host facility backing this context
    pub fn host(&self) -> &dyn HostFacility {
        &*self.host
    }

    pub fn priority_table(&self) -> &PriorityTable {
        &self.priorities
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Ticks elapsed since [`init`](Osal::init).
    pub fn system_ticks(&self) -> Ticks {
        self.ticks.now()
    }

    pub fn milliseconds_to_ticks(&self, ms: Delay) -> Ticks {
        TickClock::milliseconds_to_ticks(ms)
    }

    /// Blocks the calling thread for at least `ms` milliseconds.
    pub fn sleep_milliseconds(&self, ms: Delay) {
        self.host.sleep(Duration::from_millis(u64::from(ms)));
    }

    /// Blocks the calling thread for at least `us` microseconds.
    pub fn sleep_microseconds(&self, us: u64) {
        self.host.sleep(Duration::from_micros(us));
    }

    pub fn yield_now(&self) {
        self.host.yield_now();
    }

    // ------------------------------------------------------------------
    // Global system lock
    // ------------------------------------------------------------------

    /// Acquires the global system lock. Not recursive.
    pub fn system_lock(&self) {
        self.system_lock.enter();
    }

    pub fn system_unlock(&self) {
        self.system_lock.exit();
    }

    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    pub fn mutex(&self) -> Result<Mutex> {
        Ok(Mutex::init(&*self.host)?)
    }

    pub fn semaphore(&self, initial: u32, limit: u32) -> Result<Semaphore> {
        Ok(Semaphore::init(&*self.host, initial, limit)?)
    }

    /// Spawns a thread running `entry_fn(entry_arg)`.
    ///
    /// A zero stack hint picks up the configured default stack size; an
    /// unnamed thread is named `<prefix>-<n>` when a prefix is configured.
    pub fn thread_create<A, F>(
        &self,
        options: ThreadOptions,
        entry_fn: F,
        entry_arg: A,
    ) -> Result<Thread>
    where
        A: Send + 'static,
        F: FnOnce(A) -> ThreadReturn + Send + 'static,
    {
        let options = self.apply_thread_defaults(options);
        Ok(Thread::create(
            &*self.host,
            &self.priorities,
            options,
            entry_fn,
            entry_arg,
        )?)
    }

    /// Closure form of [`thread_create`](Osal::thread_create).
    pub fn thread_spawn<F>(&self, options: ThreadOptions, body: F) -> Result<Thread>
    where
        F: FnOnce() -> ThreadReturn + Send + 'static,
    {
        let options = self.apply_thread_defaults(options);
        Ok(Thread::spawn(&*self.host, &self.priorities, options, body)?)
    }

    pub fn thread_current(&self) -> ThreadId {
        Thread::current(&*self.host)
    }

    fn apply_thread_defaults(&self, mut options: ThreadOptions) -> ThreadOptions {
        if options.stack_hint == 0 {
            options.stack_hint = self.default_stack_size;
        }

        if options.name.is_none() {
            if let Some(prefix) = &self.thread_name_prefix {
                let seq = self.next_thread_seq.fetch_add(1, Ordering::Relaxed);
                options.name = Some(format!("{}-{}", prefix, seq));
            }
        }

        options
    }

    // ------------------------------------------------------------------
    // Fatal stops
    // ------------------------------------------------------------------

    /// Reports `message` and stops the calling thread permanently.
    pub fn halt(&self, message: &str) -> ! {
        error!(
            thread_id = self.thread_current().as_raw(),
            ticks = self.system_ticks(),
            "system halted: {}",
            message
        );
        park_forever()
    }

    /// Stops the calling thread permanently.
    pub fn exit(&self) -> ! {
        error!(
            thread_id = self.thread_current().as_raw(),
            ticks = self.system_ticks(),
            "system exit requested"
        );
        park_forever()
    }
}

fn park_forever() -> ! {
    loop {
        std::thread::park();
    }
}

impl fmt::Debug for Osal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Osal")
            .field("host", &self.host.name())
            .field("ticks", &self.system_ticks())
            .field("priorities", &self.priorities)
            .field("default_stack_size", &self.default_stack_size)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("post_init_done", &self.post_init_done.load(Ordering::Acquire))
            .finish()
    }
}
