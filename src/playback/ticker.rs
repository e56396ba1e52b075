//! A cancellable repeating timer driven by the engine thread's receive loop.
//!
//! The ticker holds at most one pending deadline. The engine thread waits on
//! its command channel until `remaining()` elapses, then fires the tick and
//! rearms. Any transition that changes whether or what is playing cancels or
//! rearms it, so a deadline computed for an earlier state never fires.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    /// Schedule the next tick one full period after `now`, replacing any
    /// pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the pending tick, `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the pending deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ticker_is_idle() {
        let t = Ticker::new(Duration::from_secs(1));
        assert!(!t.is_armed());
        assert_eq!(t.remaining(Instant::now()), None);
    }

    #[test]
    fn arm_schedules_one_period_ahead() {
        let mut t = Ticker::new(Duration::from_millis(500));
        let now = Instant::now();
        t.arm(now);
        assert_eq!(t.remaining(now), Some(Duration::from_millis(500)));
        assert_eq!(
            t.remaining(now + Duration::from_secs(2)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn fire_only_after_deadline_and_only_once() {
        let mut t = Ticker::new(Duration::from_millis(100));
        let now = Instant::now();
        t.arm(now);
        assert!(!t.fire(now));
        assert!(t.fire(now + Duration::from_millis(100)));
        assert!(!t.is_armed());
        assert!(!t.fire(now + Duration::from_millis(300)));
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let mut t = Ticker::new(Duration::from_millis(100));
        let now = Instant::now();
        t.arm(now);
        t.cancel();
        assert!(!t.fire(now + Duration::from_secs(1)));
    }

    #[test]
    fn rearm_replaces_previous_deadline() {
        let mut t = Ticker::new(Duration::from_millis(100));
        let now = Instant::now();
        t.arm(now);
        t.arm(now + Duration::from_millis(80));
        assert!(!t.fire(now + Duration::from_millis(120)));
        assert!(t.fire(now + Duration::from_millis(180)));
    }
}
