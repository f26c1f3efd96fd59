//! Timers: injectable clocks with cancellable handles.
//!
//! The game never sleeps or registers callbacks. It asks a `Scheduler` to
//! remember a `TimerEvent` and later drains the events that came due,
//! handling each one to completion before the next.
//!
//! ## Available Schedulers
//!
//! - `ManualClock`: virtual time advanced explicitly. Deterministic tests.
//! - `WallClock`: monotonic real time for interactive hosts.
//!
//! Both are thin wrappers over `TimerQueue`, which orders timers by
//! deadline and breaks ties by scheduling order.

pub mod manual;
pub mod queue;
pub mod wall;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

pub use manual::ManualClock;
pub use queue::TimerQueue;
pub use wall::WallClock;

/// Scheduler time in milliseconds.
pub type Millis = u64;

/// Handle to a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// What a timer does when it fires.
///
/// Every event is stamped with the round that scheduled it, so the game
/// can drop anything left over from an earlier round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Setup delay elapsed: reshuffle, start ambient and the countdown.
    SetupComplete { round: u32 },
    /// Mismatch delay elapsed: flip both cards back.
    MismatchRevert {
        round: u32,
        first: CardId,
        second: CardId,
    },
    /// One countdown tick.
    CountdownTick { round: u32 },
}

impl TimerEvent {
    /// The round this event belongs to.
    #[must_use]
    pub fn round(&self) -> u32 {
        match *self {
            TimerEvent::SetupComplete { round }
            | TimerEvent::MismatchRevert { round, .. }
            | TimerEvent::CountdownTick { round } => round,
        }
    }
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    /// Handle it was scheduled under.
    pub handle: TimerHandle,
    /// The payload.
    pub event: TimerEvent,
    /// When it was due.
    pub deadline: Millis,
}

/// A source of time and timers.
///
/// ## Contract
///
/// - `schedule_*` never fires anything synchronously.
/// - `cancel` is idempotent: unknown, fired or already-cancelled handles
///   are ignored.
/// - A repeating timer stays active (same handle) until cancelled.
/// - `pop_due` returns due timers one at a time in deadline order; the
///   caller handles each before asking for the next, so a handler may
///   cancel timers that would otherwise fire in the same drain.
pub trait Scheduler {
    /// Current time.
    fn now(&self) -> Millis;

    /// Fire `event` once, `delay` from now.
    fn schedule_once(&mut self, delay: Millis, event: TimerEvent) -> TimerHandle;

    /// Fire `event` every `interval`, first after one interval.
    fn schedule_repeating(&mut self, interval: Millis, event: TimerEvent) -> TimerHandle;

    /// Cancel a timer.
    fn cancel(&mut self, handle: TimerHandle);

    /// Is the timer still scheduled?
    fn is_active(&self, handle: TimerHandle) -> bool;

    /// Number of scheduled timers.
    fn active_count(&self) -> usize;

    /// Remove and return the earliest timer due at or before `until`.
    fn pop_due(&mut self, until: Millis) -> Option<FiredTimer>;
}
