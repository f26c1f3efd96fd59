//! Deadline-ordered timer storage shared by the schedulers.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::{FiredTimer, Millis, TimerEvent, TimerHandle};

#[derive(Clone, Debug)]
struct Entry {
    event: TimerEvent,
    interval: Option<Millis>,
}

/// Timers keyed by `(deadline, handle)`.
///
/// Handles are allocated monotonically, so timers with equal deadlines
/// fire in the order they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Millis, TimerHandle), Entry>,
    deadlines: FxHashMap<TimerHandle, Millis>,
    next_handle: u64,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer due at `deadline`, repeating every `interval` if given.
    pub fn insert(
        &mut self,
        deadline: Millis,
        interval: Option<Millis>,
        event: TimerEvent,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        // A zero interval would refire forever within one drain
        let interval = interval.map(|i| i.max(1));
        self.entries.insert((deadline, handle), Entry { event, interval });
        self.deadlines.insert(handle, deadline);
        handle
    }

    /// Remove a timer. Returns false if it was not scheduled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle) {
            Some(deadline) => {
                self.entries.remove(&(deadline, handle));
                true
            }
            None => false,
        }
    }

    /// Is the timer scheduled?
    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No timers scheduled?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// Repeating timers are re-queued under the same handle one interval
    /// after the deadline that just fired. A repeating timer whose next
    /// deadline would pass `Millis::MAX` fires this last time and is dropped.
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTimer> {
        let (&(deadline, handle), _) = self.entries.first_key_value()?;
        if deadline > until {
            return None;
        }

        let entry = self.entries.remove(&(deadline, handle))?;
        match entry.interval.and_then(|interval| deadline.checked_add(interval)) {
            Some(next) => {
                self.deadlines.insert(handle, next);
                self.entries.insert((next, handle), entry.clone());
            }
            None => {
                self.deadlines.remove(&handle);
            }
        }

        Some(FiredTimer {
            handle,
            event: entry.event,
            deadline,
        })
    }
}
