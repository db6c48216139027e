use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time reading relative to an arbitrary fixed origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven source for deterministic stepping.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: Cell<Duration>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_millis(&self, millis: u64) {
        self.now.set(Duration::from_millis(millis));
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// One clock reading, in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub elapsed_ms: u64,
    pub delta_ms: u64,
}

/// Elapsed time since start and delta since the previous tick.
///
/// Constructing the clock captures the start time; there is no stopped state.
#[derive(Debug)]
pub struct AnimationClock<T: TimeSource> {
    source: T,
    start: Duration,
    last_elapsed_ms: u64,
}

impl<T: TimeSource> AnimationClock<T> {
    pub fn start(source: T) -> Self {
        let start = source.now();
        Self {
            source,
            start,
            last_elapsed_ms: 0,
        }
    }

    pub fn tick(&mut self) -> ClockTick {
        let elapsed = self.source.now().saturating_sub(self.start);
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let delta_ms = elapsed_ms.saturating_sub(self.last_elapsed_ms);
        self.last_elapsed_ms = elapsed_ms;
        ClockTick {
            elapsed_ms,
            delta_ms,
        }
    }

    pub fn last_elapsed_ms(&self) -> u64 {
        self.last_elapsed_ms
    }
}
