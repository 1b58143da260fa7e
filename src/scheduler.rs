//! Virtual timers for the game loop.
//!
//! Time is a `Duration` measured from an arbitrary origin chosen by the host
//! (the binary uses the instant the game started). Nothing here sleeps; the
//! host asks for the next deadline and feeds the current time back in.

use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Timer {
    /// The recurring interval fired.
    Tick,
    /// The one-shot timeout fired.
    Restart,
}

struct Interval {
    period: Duration,
    next: Duration,
}

#[derive(Default)]
pub struct Scheduler {
    interval: Option<Interval>,
    timeout: Option<Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the recurring timer, replacing any running one.
    pub fn set_interval(&mut self, now: Duration, period: Duration) {
        self.interval = Some(Interval { period, next: now + period });
    }

    pub fn clear_interval(&mut self) {
        self.interval = None;
    }

    /// Arms the one-shot timer, replacing any pending one.
    pub fn set_timeout(&mut self, now: Duration, delay: Duration) {
        self.timeout = Some(now + delay);
    }

    pub fn clear_timeout(&mut self) {
        self.timeout = None;
    }

    pub fn interval_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn timeout_pending(&self) -> bool {
        self.timeout.is_some()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        let tick = self.interval.as_ref().map(|i| i.next);
        match (tick, self.timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Takes the earliest timer whose deadline is not after `now`.
    ///
    /// An overdue interval fires once and is then rescheduled a full period
    /// after `now`, so a stalled host never sees a burst of catch-up ticks.
    pub fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        let tick_at = self.interval.as_ref().map(|i| i.next).filter(|t| *t <= now);
        let timeout_at = self.timeout.filter(|t| *t <= now);

        match (tick_at, timeout_at) {
            (None, None) => None,
            (Some(t), Some(r)) if t < r => Some(self.fire_interval(now)),
            (Some(_), None) => Some(self.fire_interval(now)),
            (_, Some(_)) => {
                self.timeout = None;
                Some(Timer::Restart)
            }
        }
    }

    fn fire_interval(&mut self, now: Duration) -> Timer {
        if let Some(interval) = self.interval.as_mut() {
            interval.next += interval.period;
            if interval.next <= now {
                interval.next = now + interval.period;
            }
        }
        Timer::Tick
    }
}
