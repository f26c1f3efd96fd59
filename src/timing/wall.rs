//! Real-time scheduler backed by `std::time::Instant`.
//!
//! The host loop calls `GameController::poll` whenever it wakes (e.g. once
//! per frame); `next_deadline` tells it how long it may sleep.

use std::time::{Duration, Instant};

use super::{FiredTimer, Millis, Scheduler, TimerEvent, TimerHandle, TimerQueue};

/// Monotonic wall-clock scheduler.
#[derive(Clone, Debug)]
pub struct WallClock {
    origin: Instant,
    queue: TimerQueue,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    /// Start a clock at time zero, now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::new(),
        }
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.next_deadline()
    }

    /// How long until the next timer is due (zero if overdue).
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(self.now())))
    }
}

impl Scheduler for WallClock {
    fn now(&self) -> Millis {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn schedule_once(&mut self, delay: Millis, event: TimerEvent) -> TimerHandle {
        let now = self.now();
        self.queue.insert(now.saturating_add(delay), None, event)
    }

    fn schedule_repeating(&mut self, interval: Millis, event: TimerEvent) -> TimerHandle {
        let now = self.now();
        self.queue
            .insert(now.saturating_add(interval), Some(interval), event)
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
        self.queue.pop_due(until)
    }
}
