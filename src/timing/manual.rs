//! Virtual clock advanced by hand.
//!
//! `now` only moves when the owner calls `advance_to`, or when a due
//! timer is popped (time jumps to that timer's deadline, so anything the
//! handler schedules is measured from the moment it fired).

use super::{FiredTimer, Millis, Scheduler, TimerEvent, TimerHandle, TimerQueue};

/// Deterministic scheduler for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Millis,
    queue: TimerQueue,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward to `time` without firing anything.
    ///
    /// Time never moves backwards; an earlier `time` is ignored.
    pub fn advance_to(&mut self, time: Millis) {
        self.now = self.now.max(time);
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.next_deadline()
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule_once(&mut self, delay: Millis, event: TimerEvent) -> TimerHandle {
        self.queue.insert(self.now.saturating_add(delay), None, event)
    }

    fn schedule_repeating(&mut self, interval: Millis, event: TimerEvent) -> TimerHandle {
        self.queue
            .insert(self.now.saturating_add(interval), Some(interval), event)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.cancel(handle);
    }

    fn is_active(&self, handle: TimerHandle) -> bool {
        self.queue.contains(handle)
    }

    fn active_count(&self) -> usize {
        self.queue.len()
    }

    fn pop_due(&mut self, until: Millis) -> Option<FiredTimer> {
        let fired = self.queue.pop_due(until)?;
        self.now = self.now.max(fired.deadline);
        Some(fired)
    }
}
