//! Millisecond timers on the monotonic clock.

use std::time::Instant;

use crate::error::{TrialError, TrialResult};

/// Milliseconds elapsed since `start`, saturating at `u64::MAX`.
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// A running timer. Consumed by `stop`, so a handle cannot be started twice.
#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn stop(self) -> u64 {
        elapsed_ms(self.started)
    }
}

/// Runs `body` and returns its output with the elapsed milliseconds.
pub fn with_stopwatch<R>(body: impl FnOnce() -> R) -> (R, u64) {
    let watch = Stopwatch::start();
    let out = body();
    (out, watch.stop())
}

/// Idle/running timer driven by script callbacks, where the caller controls the
/// start and stop order.
#[derive(Debug, Default)]
pub struct TimerSlot {
    running: Option<Stopwatch>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn start(&mut self) -> TrialResult<()> {
        if self.running.is_some() {
            return Err(TrialError::AlreadyRunning);
        }
        self.running = Some(Stopwatch::start());
        Ok(())
    }

    /// Stops the timer and returns to idle.
    pub fn stop(&mut self) -> TrialResult<u64> {
        self.running
            .take()
            .map(Stopwatch::stop)
            .ok_or(TrialError::NotRunning)
    }
}
