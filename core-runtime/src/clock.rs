//! # Tick Clock
//!
//! Process-wide monotonic counter started once at init. One tick is one
//! millisecond, so tick/millisecond conversion is the identity.

use bridge_traits::{Delay, MonotonicClock};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Tick count since the clock was started.
pub type Ticks = u64;

/// Monotonic tick counter anchored at the moment it was started.
#[derive(Clone)]
pub struct TickClock {
    source: Arc<dyn MonotonicClock>,
    origin: Duration,
}

impl TickClock {
    /// Starts counting from the current reading of `source`.
    pub fn start(source: Arc<dyn MonotonicClock>) -> Self {
        let origin = source.now();
        Self { source, origin }
    }

    /// Ticks elapsed since [`start`](TickClock::start).
    pub fn now(&self) -> Ticks {
        let elapsed = self.source.now().saturating_sub(self.origin);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Converts milliseconds to ticks (identity).
    pub fn milliseconds_to_ticks(ms: Delay) -> Ticks {
        Ticks::from(ms)
    }
}

impl fmt::Debug for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickClock")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::sync::Mutex;

    mock! {
        Clock {}

        impl MonotonicClock for Clock {
            fn now(&self) -> Duration;
        }
    }

    fn scripted_clock(readings_ms: Vec<u64>) -> Arc<dyn MonotonicClock> {
        let readings = Mutex::new(readings_ms.into_iter().map(Duration::from_millis));
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(move || readings.lock().unwrap().next().unwrap());
        Arc::new(clock)
    }

    #[test]
    fn test_starts_at_zero() {
        let clock = TickClock::start(scripted_clock(vec![1_000, 1_000]));
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_ticks_are_milliseconds_since_start() {
        let clock = TickClock::start(scripted_clock(vec![5_000, 5_250, 6_000, 6_000]));
        assert_eq!(clock.now(), 250);
        assert_eq!(clock.now(), 1_000);
        assert_eq!(clock.now(), 1_000);
    }

    #[test]
    fn test_sub_millisecond_readings_truncate() {
        let readings = Mutex::new(
            vec![Duration::from_micros(100), Duration::from_micros(1_099)].into_iter(),
        );
        let mut source = MockClock::new();
        source
            .expect_now()
            .returning(move || readings.lock().unwrap().next().unwrap());

        let clock = TickClock::start(Arc::new(source));
        assert_eq!(clock.now(), 0);
    }

    #[test]
    fn test_milliseconds_to_ticks_is_identity() {
        for ms in [0, 1, 40, 1_000, Delay::MAX] {
            assert_eq!(TickClock::milliseconds_to_ticks(ms), u64::from(ms));
        }
    }
}
