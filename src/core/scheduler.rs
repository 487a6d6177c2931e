//! Scheduler module - cancellable single-shot tick timers
//!
//! The session never touches the wall clock directly: it asks a
//! [`TickScheduler`] for a timer and reacts when the driver reports that the
//! handle fired. Exactly one tick is pending at any time. Handles are
//! monotonic, so a cancelled timer's handle can never be mistaken for the
//! live one.
//!
//! [`WallScheduler`] backs the terminal runner; [`ManualScheduler`] lets
//! tests drive ticks deterministically without real waits.

use std::time::{Duration, Instant};

/// Identifier for a scheduled tick. Compared by the session to reject
/// stale firings after a cancel or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Cancellable single-shot timer interface
pub trait TickScheduler {
    /// Schedule a timer to fire after `delay`, replacing any pending one
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer; a handle that is not pending is a no-op
    fn cancel(&mut self, handle: TimerHandle);
}

/// Wall-clock scheduler holding a single `Instant` deadline
#[derive(Debug)]
pub struct WallScheduler {
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl WallScheduler {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: None,
        }
    }

    /// Deadline of the pending timer, for input-poll timeout computation
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Take the pending handle if its deadline has passed
    pub fn poll_fired(&mut self) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, at)) if Instant::now() >= at => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl Default for WallScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for WallScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, Instant::now() + delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.map(|(h, _)| h) == Some(handle) {
            self.pending = None;
        }
    }
}

/// Deterministic scheduler for tests: records the pending delay and fires
/// only when the test says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<(TimerHandle, Duration)>,
    scheduled_count: u64,
    cancelled_count: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending timer, if any, with its requested delay
    pub fn pending(&self) -> Option<(TimerHandle, Duration)> {
        self.pending
    }

    /// Take the pending handle, as if its delay elapsed
    pub fn fire(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|(handle, _)| handle)
    }

    pub fn scheduled_count(&self) -> u64 {
        self.scheduled_count
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled_count
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        self.scheduled_count += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.map(|(h, _)| h) == Some(handle) {
            self.pending = None;
            self.cancelled_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(Duration::from_millis(200));
        let b = sched.schedule(Duration::from_millis(200));
        assert_ne!(a, b);
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule(Duration::from_millis(200));
        let b = sched.schedule(Duration::from_millis(100));

        assert_eq!(sched.pending(), Some((b, Duration::from_millis(100))));
        // The replaced handle is no longer cancellable.
        sched.cancel(a);
        assert!(sched.pending().is_some());
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut sched = ManualScheduler::new();
        let handle = sched.schedule(Duration::from_millis(200));
        sched.cancel(handle);
        assert!(sched.pending().is_none());
        assert_eq!(sched.cancelled_count(), 1);
    }

    #[test]
    fn test_fire_consumes_the_timer() {
        let mut sched = ManualScheduler::new();
        let handle = sched.schedule(Duration::from_millis(200));
        assert_eq!(sched.fire(), Some(handle));
        assert_eq!(sched.fire(), None);
    }

    #[test]
    fn test_wall_scheduler_fires_after_deadline() {
        let mut sched = WallScheduler::new();
        let handle = sched.schedule(Duration::from_millis(0));
        assert_eq!(sched.poll_fired(), Some(handle));
        assert_eq!(sched.poll_fired(), None);
    }

    #[test]
    fn test_wall_scheduler_does_not_fire_early() {
        let mut sched = WallScheduler::new();
        sched.schedule(Duration::from_secs(3600));
        assert_eq!(sched.poll_fired(), None);
        assert!(sched.deadline().is_some());
    }
}
