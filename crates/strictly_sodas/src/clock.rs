//! Wall-clock access and the derived game timer.

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;
use tracing::instrument;

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. For tests and replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.advance(TimeDelta::seconds(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Elapsed play time, computed from stored instants rather than ticks.
///
/// Time spent paused (behind a blocking modal) is not counted. A stopped
/// timer keeps reporting the value it had when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTimer {
    banked: TimeDelta,
    running_since: Option<DateTime<Utc>>,
    stopped: bool,
}

impl GameTimer {
    /// A timer that starts counting at `now`.
    pub fn running(now: DateTime<Utc>) -> Self {
        Self {
            banked: TimeDelta::zero(),
            running_since: Some(now),
            stopped: false,
        }
    }

    /// A timer that waits for [`resume`](Self::resume) before counting.
    pub fn paused() -> Self {
        Self {
            banked: TimeDelta::zero(),
            running_since: None,
            stopped: false,
        }
    }

    /// Checks if the timer is counting.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Checks if the timer was stopped for good.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stops counting until resumed.
    #[instrument(skip(self))]
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            self.banked += (now - since).max(TimeDelta::zero());
        }
    }

    /// Starts or restarts counting from `now`. No effect once stopped.
    #[instrument(skip(self))]
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if !self.stopped && self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Freezes the timer at its current value.
    #[instrument(skip(self))]
    pub fn stop(&mut self, now: DateTime<Utc>) {
        self.pause(now);
        self.stopped = true;
    }

    /// Time counted so far.
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        let live = self
            .running_since
            .map(|since| (now - since).max(TimeDelta::zero()))
            .unwrap_or_else(TimeDelta::zero);
        self.banked + live
    }

    /// Whole seconds counted so far.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from(self.elapsed(now).num_seconds()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_timer_tracks_clock() {
        let clock = ManualClock::default();
        let timer = GameTimer::running(clock.now());
        clock.advance_secs(42);
        assert_eq!(timer.elapsed_secs(clock.now()), 42);
    }

    #[test]
    fn test_paused_timer_starts_on_resume() {
        let clock = ManualClock::default();
        let mut timer = GameTimer::paused();
        clock.advance_secs(30);
        assert_eq!(timer.elapsed_secs(clock.now()), 0);

        timer.resume(clock.now());
        clock.advance_secs(5);
        assert_eq!(timer.elapsed_secs(clock.now()), 5);
    }

    #[test]
    fn test_pause_excludes_modal_time() {
        let clock = ManualClock::default();
        let mut timer = GameTimer::running(clock.now());
        clock.advance_secs(10);
        timer.pause(clock.now());
        clock.advance_secs(100);
        timer.resume(clock.now());
        clock.advance_secs(3);
        assert_eq!(timer.elapsed_secs(clock.now()), 13);
    }

    #[test]
    fn test_stop_freezes() {
        let clock = ManualClock::default();
        let mut timer = GameTimer::running(clock.now());
        clock.advance_secs(8);
        timer.stop(clock.now());
        clock.advance_secs(50);
        timer.resume(clock.now());
        assert_eq!(timer.elapsed_secs(clock.now()), 8);
        assert!(timer.is_stopped());
    }
}
