//! Runtime demonstration
//!
//! Starts the portable layer on the desktop host, runs a small pool of
//! workers fed through a bounded semaphore pair, and reports their results.
//!
//! Run with:
//! ```bash
//! cargo run -p core-runtime --example worker_demo
//!
//! # JSON logs
//! cargo run -p core-runtime --example worker_demo -- json
//! ```

use bridge_desktop::DesktopHost;
use bridge_traits::time::LogLevel;
use bridge_traits::DELAY_INFINITE;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::{Osal, OsalConfig};
use core_sync::{Priority, ThreadOptions};
use std::env;
use std::sync::{Arc, Mutex};
use tracing::info;

const WORKERS: usize = 3;
const JOBS: u32 = 12;

fn main() -> core_runtime::Result<()> {
    let format = match env::args().nth(1).as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    };

    init_logging(
        LoggingConfig::default()
            .with_format(format)
            .with_level(LogLevel::Debug),
    )?;

    let config = OsalConfig::builder()
        .host(Arc::new(DesktopHost::new()))
        .thread_name_prefix("worker")
        .on_post_init(|osal| {
            info!(ticks = osal.system_ticks(), "post-init hook ran");
            Ok(())
        })
        .build()?;

    let osal = Arc::new(Osal::init(config)?);
    osal.post_init()?;

    let pending = Arc::new(osal.semaphore(0, JOBS + 1)?);
    let jobs = Arc::new(Mutex::new((1..=JOBS).collect::<Vec<_>>()));

    let workers = (0..WORKERS)
        .map(|_| {
            let rt = Arc::clone(&osal);
            let pending = Arc::clone(&pending);
            let jobs = Arc::clone(&jobs);
            osal.thread_spawn(ThreadOptions::new().with_priority(Priority::Low), move || {
                let mut done = 0;
                loop {
                    pending.wait(DELAY_INFINITE);
                    let job = jobs.lock().map(|mut queue| queue.pop()).unwrap_or(None);
                    let Some(job) = job else {
                        // Wake the next worker so it can see the queue is drained.
                        pending.signal();
                        return done;
                    };
                    rt.sleep_milliseconds(job);
                    done += 1;
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for _ in 0..JOBS {
        pending.signal();
    }
    osal.sleep_milliseconds(5);
    // One extra permit lets the first idle worker discover the empty queue.
    pending.signal();

    let mut total = 0;
    for worker in workers {
        let id = worker.id();
        let done = worker.join()?;
        info!(%id, done, "worker finished");
        total += done;
    }

    info!(total, ticks = osal.system_ticks(), "all jobs complete");

    match Arc::try_unwrap(osal) {
        Ok(osal) => osal.deinit(),
        Err(_) => info!("context still shared; leaving it alive"),
    }
    Ok(())
}
