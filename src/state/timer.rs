//! One-shot, restartable hover timer.
//!
//! The selection controller never sleeps or spawns anything. It starts and
//! stops a [`HoverTimer`] and the host polls it from its event loop. Tests use
//! [`ManualTimer`] and advance a fake clock by hand.

use std::time::{Duration, Instant};

/// Cancellable one-shot timer.
///
/// # Contract
/// - `start` while running restarts the interval from now.
/// - After `stop`, `poll_elapsed` returns `false` until the next `start`.
/// - `poll_elapsed` returns `true` at most once per `start`, then the timer
///   is stopped.
pub trait HoverTimer {
    /// Arm the timer for `delay` from now.
    fn start(&mut self, delay: Duration);

    /// Disarm the timer. No-op when idle.
    fn stop(&mut self);

    /// Whether an interval is currently armed.
    fn is_running(&self) -> bool;

    /// Report (once) that the armed interval has elapsed.
    fn poll_elapsed(&mut self) -> bool;
}

/// Wall-clock timer for the interactive view.
#[derive(Debug, Clone, Default)]
pub struct InstantTimer {
    deadline: Option<Instant>,
}

impl InstantTimer {
    /// Disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left before the armed interval elapses, if armed.
    ///
    /// Lets the event loop bound its poll timeout.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

impl HoverTimer for InstantTimer {
    fn start(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn stop(&mut self) {
        self.deadline = None;
    }

    fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    fn poll_elapsed(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Fake-clock timer: time only moves when [`ManualTimer::advance`] is called.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now: Duration,
    deadline: Option<Duration>,
    starts: usize,
}

impl ManualTimer {
    /// Disarmed timer with the fake clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the fake clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Elapsed fake time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of `start` calls so far.
    pub fn start_count(&self) -> usize {
        self.starts
    }
}

impl HoverTimer for ManualTimer {
    fn start(&mut self, delay: Duration) {
        self.starts += 1;
        self.deadline = Some(self.now + delay);
    }

    fn stop(&mut self) {
        self.deadline = None;
    }

    fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    fn poll_elapsed(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
